//! View seams for the controllers. A [`FormView`] stands in for one form's
//! elements: its named inputs, the submit affordance and the message banner.
//! Handles are shared (`&self`) like document elements, so implementations use
//! interior mutability. Views must never log field values.

use super::field::Validity;
use std::{
    collections::BTreeMap,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.class_name(), self.text)
    }
}

/// How a navigation affects history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationMode {
    /// Replace the current entry (`location.replace`).
    Replace,
    /// Push a new entry (`location.href = ..`).
    Assign,
}

/// The elements one controller drives.
pub trait FormView: Send + Sync {
    /// Current value of a named input, `None` if the form has no such input.
    fn value(&self, field: &str) -> Option<String>;
    fn set_value(&self, field: &str, value: &str);
    fn validity(&self, field: &str) -> Validity;
    fn set_validity(&self, field: &str, validity: Validity);
    /// Clears every input value and validity tag.
    fn reset(&self);

    /// Toggles the loading indicator; a loading form has its submit disabled.
    fn set_loading(&self, loading: bool, label: &str);
    fn is_loading(&self) -> bool;

    /// Replaces the banner text and kind; the banner stays hidden until
    /// [`FormView::set_message_visible`] is called.
    fn set_message(&self, message: &Message);
    fn set_message_visible(&self, visible: bool);

    /// Snapshot of the affordance and banner.
    fn ui_state(&self) -> UiState;
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str, mode: NavigationMode);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageState {
    pub message: Message,
    pub visible: bool,
}

/// Snapshot of the transient UI of one form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub loading: bool,
    pub submit_label: String,
    pub message: Option<MessageState>,
}

#[derive(Debug, Default)]
struct ViewState {
    values: BTreeMap<String, String>,
    tags: BTreeMap<String, Validity>,
    ui: UiState,
    navigations: Vec<(String, NavigationMode)>,
}

/// In-memory form used by the CLI and by tests. It also records navigations.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<ViewState>,
}

impl MemoryView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the named inputs present and empty.
    #[must_use]
    pub fn with_fields<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let view = Self::default();
        {
            let mut state = view.state();
            for name in names {
                state.values.insert(name.to_string(), String::new());
            }
        }
        view
    }

    /// Message currently shown, if visible.
    #[must_use]
    pub fn visible_message(&self) -> Option<Message> {
        self.state()
            .ui
            .message
            .as_ref()
            .filter(|state| state.visible)
            .map(|state| state.message.clone())
    }

    #[must_use]
    pub fn navigations(&self) -> Vec<(String, NavigationMode)> {
        self.state().navigations.clone()
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FormView for MemoryView {
    fn value(&self, field: &str) -> Option<String> {
        self.state().values.get(field).cloned()
    }

    fn set_value(&self, field: &str, value: &str) {
        self.state()
            .values
            .insert(field.to_string(), value.to_string());
    }

    fn validity(&self, field: &str) -> Validity {
        self.state().tags.get(field).copied().unwrap_or_default()
    }

    fn set_validity(&self, field: &str, validity: Validity) {
        let mut state = self.state();
        if validity == Validity::Unvalidated {
            state.tags.remove(field);
        } else {
            state.tags.insert(field.to_string(), validity);
        }
    }

    fn reset(&self) {
        let mut state = self.state();
        for value in state.values.values_mut() {
            value.clear();
        }
        state.tags.clear();
    }

    fn set_loading(&self, loading: bool, label: &str) {
        let mut state = self.state();
        state.ui.loading = loading;
        state.ui.submit_label = label.to_string();
    }

    fn is_loading(&self) -> bool {
        self.state().ui.loading
    }

    fn set_message(&self, message: &Message) {
        self.state().ui.message = Some(MessageState {
            message: message.clone(),
            visible: false,
        });
    }

    fn set_message_visible(&self, visible: bool) {
        if let Some(message) = self.state().ui.message.as_mut() {
            message.visible = visible;
        }
    }

    fn ui_state(&self) -> UiState {
        self.state().ui.clone()
    }
}

impl Navigator for MemoryView {
    fn navigate(&self, target: &str, mode: NavigationMode) {
        self.state().navigations.push((target.to_string(), mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_values_and_tags() {
        let view = MemoryView::new();
        view.set_value("email", "jane@example.com");
        view.set_validity("email", Validity::Valid);

        view.reset();

        assert_eq!(view.value("email"), Some(String::new()));
        assert_eq!(view.validity("email"), Validity::Unvalidated);
    }

    #[test]
    fn set_message_starts_hidden() {
        let view = MemoryView::new();
        view.set_message(&Message::error("first"));
        assert_eq!(view.visible_message(), None);

        view.set_message_visible(true);
        assert_eq!(view.visible_message(), Some(Message::error("first")));

        view.set_message(&Message::success("second"));
        assert_eq!(view.visible_message(), None);

        view.set_message_visible(true);
        assert_eq!(view.visible_message(), Some(Message::success("second")));

        view.set_message_visible(false);
        assert_eq!(view.visible_message(), None);
        assert!(view.ui_state().message.is_some());
    }

    #[test]
    fn loading_tracks_label() {
        let view = MemoryView::with_fields(["email", "password"]);
        assert_eq!(view.value("password"), Some(String::new()));
        assert!(!view.is_loading());

        view.set_loading(true, "Signing In...");
        assert!(view.is_loading());
        assert_eq!(view.ui_state().submit_label, "Signing In...");
    }

    #[test]
    fn navigator_records_targets() {
        let view = MemoryView::new();
        view.navigate("/users/login_page/", NavigationMode::Assign);
        assert_eq!(
            view.navigations(),
            vec![("/users/login_page/".to_string(), NavigationMode::Assign)]
        );
    }

    #[test]
    fn message_display() {
        assert_eq!(Message::error("nope").to_string(), "[error] nope");
    }
}
