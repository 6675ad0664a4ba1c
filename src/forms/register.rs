//! Registration form: names, email and password, validated when a field loses
//! focus. On success the form is cleared and the page moves to the login page
//! after nine seconds, leaving time to read the activation notice.

use super::{
    controller::{FormController, FormKind, FormSpec, InputPolicy, Redirect},
    feedback::FeedbackPolicy,
    field::{FieldKind, FieldSpec, Validity},
    schedule::TaskKind,
    submission::{SubmissionState, SubmitOutcome, SuccessRule},
    validator::Ruleset,
    view::{FormView, NavigationMode, Navigator, UiState},
};
use crate::api::{AppError, Transport, REGISTER_PATH};
use std::{sync::Arc, time::Duration};

/// Page shown after a successful registration.
pub const LOGIN_PAGE: &str = "/users/login_page/";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("first_name", FieldKind::Text),
    FieldSpec::required("last_name", FieldKind::Text),
    FieldSpec::required("email", FieldKind::Email),
    FieldSpec::required("password", FieldKind::Password),
];

pub static REGISTRATION_FORM: FormSpec = FormSpec {
    kind: FormKind::Registration,
    fields: FIELDS,
    ruleset: Ruleset::Registration,
    input_policy: InputPolicy::ValidateOnBlur,
    endpoint: REGISTER_PATH,
    success_rule: SuccessRule::Tolerant,
    idle_label: "Create Account",
    busy_label: "Creating Account...",
    invalid_message: "Please fill in all required fields correctly",
    success_message: "Registration successful! Please check your email to activate your account.",
    failure_fallback: "Registration failed",
    redirect: Redirect {
        target: LOGIN_PAGE,
        mode: NavigationMode::Assign,
        delay: Duration::from_millis(9000),
    },
    feedback: FeedbackPolicy::REGISTRATION,
    hide_message_on_submit: true,
    reset_on_success: true,
};

pub struct RegistrationController {
    form: FormController,
}

impl RegistrationController {
    /// # Errors
    /// Returns `AppError::Config` if the view lacks one of the registration fields.
    pub fn attach(
        view: Arc<dyn FormView>,
        navigator: Arc<dyn Navigator>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            form: FormController::attach(&REGISTRATION_FORM, view, navigator, transport)?,
        })
    }

    pub fn input(&mut self, field: &str, value: &str) -> Option<Validity> {
        self.form.input(field, value)
    }

    pub fn blur(&mut self, field: &str) -> Option<Validity> {
        self.form.blur(field)
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.form.submit(|_| Ok(())).await
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.form.state()
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<SubmitOutcome> {
        self.form.last_outcome()
    }

    #[must_use]
    pub fn pending_tasks(&self) -> Vec<(TaskKind, Duration)> {
        self.form.pending_tasks()
    }

    #[must_use]
    pub fn ui_state(&self) -> UiState {
        self.form.ui_state()
    }

    pub async fn wait_for_navigation(&mut self) {
        self.form.wait_for_navigation().await;
    }

    pub fn detach(self) {
        self.form.detach();
    }
}
