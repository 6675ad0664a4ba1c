//! Status banner handling. A new message replaces the text and kind at once;
//! when it becomes visible and whether it hides again depends on the form's
//! [`FeedbackPolicy`]. Showing a message cancels the reveal/hide tasks left
//! over from the previous one.

use super::{
    schedule::{Scheduler, TaskKind},
    view::{FormView, Message},
};
use std::{sync::Arc, time::Duration};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedbackPolicy {
    /// Delay before the banner is shown, `None` for immediately.
    pub reveal_delay: Option<Duration>,
    /// Delay after which the banner hides again, `None` to keep it.
    pub auto_hide: Option<Duration>,
}

impl FeedbackPolicy {
    pub const LOGIN: Self = Self {
        reveal_delay: None,
        auto_hide: Some(Duration::from_millis(5000)),
    };

    pub const REGISTRATION: Self = Self {
        reveal_delay: Some(Duration::from_millis(100)),
        auto_hide: None,
    };
}

pub struct FeedbackPresenter {
    view: Arc<dyn FormView>,
    policy: FeedbackPolicy,
}

impl FeedbackPresenter {
    pub fn new(view: Arc<dyn FormView>, policy: FeedbackPolicy) -> Self {
        Self { view, policy }
    }

    #[must_use]
    pub fn policy(&self) -> FeedbackPolicy {
        self.policy
    }

    pub fn show(&self, scheduler: &mut Scheduler, message: &Message) {
        scheduler.cancel(TaskKind::RevealMessage);
        scheduler.cancel(TaskKind::HideMessage);

        self.view.set_message(message);

        match self.policy.reveal_delay {
            None => self.view.set_message_visible(true),
            Some(delay) => {
                let view = Arc::clone(&self.view);
                scheduler.schedule(TaskKind::RevealMessage, delay, move || {
                    view.set_message_visible(true);
                });
            }
        }

        if let Some(delay) = self.policy.auto_hide {
            let view = Arc::clone(&self.view);
            scheduler.schedule(TaskKind::HideMessage, delay, move || {
                view.set_message_visible(false);
            });
        }
    }

    /// Hides the banner now, dropping any pending reveal.
    pub fn hide(&self, scheduler: &mut Scheduler) {
        scheduler.cancel(TaskKind::RevealMessage);
        scheduler.cancel(TaskKind::HideMessage);
        self.view.set_message_visible(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::view::MemoryView;

    #[tokio::test(start_paused = true)]
    async fn login_policy_shows_now_and_hides_after_five_seconds() {
        let view = Arc::new(MemoryView::new());
        let presenter = FeedbackPresenter::new(view.clone(), FeedbackPolicy::LOGIN);
        let mut scheduler = Scheduler::new();

        presenter.show(&mut scheduler, &Message::error("Login failed"));
        assert_eq!(view.visible_message(), Some(Message::error("Login failed")));

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert!(view.visible_message().is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(view.visible_message(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn new_message_restarts_auto_hide() {
        let view = Arc::new(MemoryView::new());
        let presenter = FeedbackPresenter::new(view.clone(), FeedbackPolicy::LOGIN);
        let mut scheduler = Scheduler::new();

        presenter.show(&mut scheduler, &Message::error("first"));
        tokio::time::sleep(Duration::from_millis(4000)).await;
        presenter.show(&mut scheduler, &Message::error("second"));

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(view.visible_message(), Some(Message::error("second")));
        assert_eq!(
            scheduler.pending(),
            vec![(TaskKind::HideMessage, Duration::from_millis(5000))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn registration_policy_reveals_after_delay_and_persists() {
        let view = Arc::new(MemoryView::new());
        let presenter = FeedbackPresenter::new(view.clone(), FeedbackPolicy::REGISTRATION);
        let mut scheduler = Scheduler::new();

        presenter.show(&mut scheduler, &Message::success("done"));
        // text and kind are replaced immediately, visibility follows
        let state = view.ui_state().message;
        assert_eq!(
            state.map(|s| (s.message, s.visible)),
            Some((Message::success("done"), false))
        );

        tokio::time::sleep(Duration::from_millis(101)).await;
        assert_eq!(view.visible_message(), Some(Message::success("done")));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(view.visible_message(), Some(Message::success("done")));
    }

    #[tokio::test(start_paused = true)]
    async fn hide_drops_pending_reveal() {
        let view = Arc::new(MemoryView::new());
        let presenter = FeedbackPresenter::new(view.clone(), FeedbackPolicy::REGISTRATION);
        let mut scheduler = Scheduler::new();

        presenter.show(&mut scheduler, &Message::error("late"));
        presenter.hide(&mut scheduler);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(view.visible_message(), None);
    }
}
