//! The shared controller behind both account forms. A [`FormSpec`] describes
//! one form (fields, endpoint, labels, messages, timings); [`FormController`]
//! runs its input handling and submission cycle against the injected seams.
//!
//! Flow Overview: check the affordance, validate every field, post one JSON
//! request, then present success or failure. The loading indicator is cleared
//! on every exit path, including when the submit future is dropped.

use super::{
    feedback::{FeedbackPolicy, FeedbackPresenter},
    field::{FieldSpec, Validity},
    schedule::{Scheduler, TaskKind},
    submission::{
        FailureKind, SubmissionState, SubmitOutcome, SuccessRule, NETWORK_ERROR_MESSAGE,
    },
    validator::{accepts, validate_field, Ruleset},
    view::{FormView, Message, NavigationMode, Navigator, UiState},
};
use crate::api::{AppError, ServerResponse, SubmissionPayload, Transport};
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, info, instrument, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Registration,
}

impl FormKind {
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            FormKind::Login => "loginForm",
            FormKind::Registration => "registerForm",
        }
    }

    #[must_use]
    pub const fn submit_id(self) -> &'static str {
        match self {
            FormKind::Login => "loginBtn",
            FormKind::Registration => "registerBtn",
        }
    }
}

/// What typing and leaving a field do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputPolicy {
    /// Re-validate on every input; blur does nothing.
    ValidateOnInput,
    /// Clear the tag on input; validate on blur.
    ValidateOnBlur,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub target: &'static str,
    pub mode: NavigationMode,
    pub delay: Duration,
}

#[derive(Debug)]
pub struct FormSpec {
    pub kind: FormKind,
    pub fields: &'static [FieldSpec],
    pub ruleset: Ruleset,
    pub input_policy: InputPolicy,
    pub endpoint: &'static str,
    pub success_rule: SuccessRule,
    pub idle_label: &'static str,
    pub busy_label: &'static str,
    pub invalid_message: &'static str,
    pub success_message: &'static str,
    pub failure_fallback: &'static str,
    pub redirect: Redirect,
    pub feedback: FeedbackPolicy,
    /// Hide the previous banner when a request starts.
    pub hide_message_on_submit: bool,
    /// Clear every field as soon as the submission succeeds.
    pub reset_on_success: bool,
}

impl FormSpec {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name).copied()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|spec| spec.name)
    }
}

/// Restores the idle affordance when dropped.
struct LoadingGuard {
    view: Arc<dyn FormView>,
    idle_label: &'static str,
}

impl LoadingGuard {
    fn engage(view: &Arc<dyn FormView>, busy_label: &str, idle_label: &'static str) -> Self {
        view.set_loading(true, busy_label);
        Self {
            view: Arc::clone(view),
            idle_label,
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.view.set_loading(false, self.idle_label);
    }
}

pub struct FormController {
    spec: &'static FormSpec,
    view: Arc<dyn FormView>,
    navigator: Arc<dyn Navigator>,
    transport: Arc<dyn Transport>,
    presenter: FeedbackPresenter,
    scheduler: Scheduler,
    state: SubmissionState,
    last_outcome: Option<SubmitOutcome>,
}

impl FormController {
    /// Binds the controller to a view, checking every declared field exists.
    ///
    /// # Errors
    /// Returns `AppError::Config` naming the first missing field.
    pub fn attach(
        spec: &'static FormSpec,
        view: Arc<dyn FormView>,
        navigator: Arc<dyn Navigator>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, AppError> {
        if let Some(missing) = spec.field_names().find(|name| view.value(name).is_none()) {
            return Err(AppError::Config(format!(
                "Form {} has no field named {missing}",
                spec.kind.element_id()
            )));
        }

        view.set_loading(false, spec.idle_label);

        debug!("attached controller to {}", spec.kind.element_id());

        Ok(Self {
            spec,
            presenter: FeedbackPresenter::new(Arc::clone(&view), spec.feedback),
            view,
            navigator,
            transport,
            scheduler: Scheduler::new(),
            state: SubmissionState::Idle,
            last_outcome: None,
        })
    }

    #[must_use]
    pub fn spec(&self) -> &'static FormSpec {
        self.spec
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<SubmitOutcome> {
        self.last_outcome
    }

    #[must_use]
    pub fn pending_tasks(&self) -> Vec<(TaskKind, Duration)> {
        self.scheduler.pending()
    }

    #[must_use]
    pub fn ui_state(&self) -> UiState {
        self.view.ui_state()
    }

    /// Waits for a scheduled redirect to run (or be cancelled).
    pub async fn wait_for_navigation(&mut self) {
        self.scheduler.wait_for(TaskKind::Navigate).await;
    }

    /// Cancels all scheduled work; the view is left as it is.
    pub fn detach(mut self) {
        self.scheduler.cancel_all();
        debug!("detached controller from {}", self.spec.kind.element_id());
    }

    /// The user typed into `field`. Returns the new tag, `None` for unknown fields.
    pub fn input(&mut self, field: &str, value: &str) -> Option<Validity> {
        let spec = self.spec.field(field)?;
        self.view.set_value(spec.name, value);

        match self.spec.input_policy {
            InputPolicy::ValidateOnInput => {
                Some(validate_field(self.view.as_ref(), self.spec.ruleset, spec).validity)
            }
            InputPolicy::ValidateOnBlur => {
                self.view.set_validity(spec.name, Validity::Unvalidated);
                Some(Validity::Unvalidated)
            }
        }
    }

    /// The user left `field`. Returns the current tag, `None` for unknown fields.
    pub fn blur(&mut self, field: &str) -> Option<Validity> {
        let spec = self.spec.field(field)?;

        match self.spec.input_policy {
            InputPolicy::ValidateOnBlur => {
                Some(validate_field(self.view.as_ref(), self.spec.ruleset, spec).validity)
            }
            InputPolicy::ValidateOnInput => Some(self.view.validity(spec.name)),
        }
    }

    /// Runs one submission cycle. `on_success` runs after the response passes
    /// the success rule; an error from it is reported like a transport failure.
    #[instrument(skip_all, fields(form = self.spec.kind.element_id()))]
    pub async fn submit<F>(&mut self, on_success: F) -> SubmitOutcome
    where
        F: FnOnce(&ServerResponse) -> Result<(), AppError> + Send,
    {
        if self.view.is_loading() {
            debug!("{} is disabled, submit ignored", self.spec.kind.submit_id());
            return SubmitOutcome::Ignored;
        }

        self.state = SubmissionState::Validating;

        let Some(payload) = self.validate_all() else {
            self.show(Message::error(self.spec.invalid_message));
            return self.finish(SubmitOutcome::Rejected);
        };

        self.state = SubmissionState::Submitting;

        if self.spec.hide_message_on_submit {
            self.presenter.hide(&mut self.scheduler);
        }

        let loading = LoadingGuard::engage(&self.view, self.spec.busy_label, self.spec.idle_label);

        let result = self
            .transport
            .post_json(self.spec.endpoint, &payload)
            .await;

        // the payload is not kept past the request
        drop(payload);

        let outcome = match result {
            Ok(response) if self.spec.success_rule.is_success(&response) => {
                match on_success(&response) {
                    Ok(()) => {
                        self.succeed();
                        SubmitOutcome::Succeeded
                    }
                    Err(err) => {
                        error!("Error completing submission: {err}");
                        self.show(Message::error(NETWORK_ERROR_MESSAGE));
                        SubmitOutcome::Failed(FailureKind::Transport)
                    }
                }
            }
            Ok(response) => {
                let text = response
                    .message()
                    .unwrap_or(self.spec.failure_fallback)
                    .to_string();
                warn!("server rejected submission: {:?}", response.status);
                self.show(Message::error(text));
                SubmitOutcome::Failed(FailureKind::Server)
            }
            Err(err) => {
                error!("Submission error: {err}");
                self.show(Message::error(NETWORK_ERROR_MESSAGE));
                SubmitOutcome::Failed(FailureKind::Transport)
            }
        };

        drop(loading);

        self.finish(outcome)
    }

    /// Validates every field; returns the payload only if all are accepted.
    fn validate_all(&self) -> Option<SubmissionPayload> {
        let mut payload = SubmissionPayload::new();
        let mut accepted = true;

        for spec in self.spec.fields {
            let field = validate_field(self.view.as_ref(), self.spec.ruleset, *spec);
            if !accepts(spec, field.validity) {
                debug!("field {} rejected: {:?}", spec.name, field.validity);
                accepted = false;
            }
            payload = payload.with_field(spec.name, &field.value);
        }

        accepted.then_some(payload)
    }

    fn succeed(&mut self) {
        info!("{} submitted successfully", self.spec.kind.element_id());

        self.show(Message::success(self.spec.success_message));

        if self.spec.reset_on_success {
            self.view.reset();
        }

        let redirect = self.spec.redirect;
        let navigator = Arc::clone(&self.navigator);
        self.scheduler
            .schedule(TaskKind::Navigate, redirect.delay, move || {
                navigator.navigate(redirect.target, redirect.mode);
            });
    }

    fn show(&mut self, message: Message) {
        self.presenter.show(&mut self.scheduler, &message);
    }

    fn finish(&mut self, outcome: SubmitOutcome) -> SubmitOutcome {
        self.state = match outcome {
            SubmitOutcome::Succeeded => SubmissionState::Succeeded,
            SubmitOutcome::Failed(_) => SubmissionState::Failed,
            SubmitOutcome::Ignored | SubmitOutcome::Rejected => SubmissionState::Idle,
        };
        debug!("submission finished in state {:?}", self.state);

        self.last_outcome = Some(outcome);
        outcome
    }
}
