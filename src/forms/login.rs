//! Login form: email and password, validated as the user types. On success the
//! returned tokens and user id are persisted and the page moves to the task
//! list after two seconds. Credentials and tokens must never be logged.

use super::{
    controller::{FormController, FormKind, FormSpec, InputPolicy, Redirect},
    feedback::FeedbackPolicy,
    field::{FieldKind, FieldSpec, Validity},
    schedule::TaskKind,
    submission::{SubmissionState, SubmitOutcome, SuccessRule},
    validator::Ruleset,
    view::{FormView, NavigationMode, Navigator, UiState},
};
use crate::{
    api::{AppError, Transport, LOGIN_PATH},
    storage::{store_login, TokenStore},
};
use std::{sync::Arc, time::Duration};

/// Page shown after a successful login.
pub const TASKS_PAGE: &str = "/task/tasks_page/";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("email", FieldKind::Email),
    FieldSpec::required("password", FieldKind::Password),
];

pub static LOGIN_FORM: FormSpec = FormSpec {
    kind: FormKind::Login,
    fields: FIELDS,
    ruleset: Ruleset::Login,
    input_policy: InputPolicy::ValidateOnInput,
    endpoint: LOGIN_PATH,
    success_rule: SuccessRule::StrictStatus,
    idle_label: "Sign In",
    busy_label: "Signing In...",
    invalid_message: "Please enter valid email and password",
    success_message: "Login successful! Redirecting...",
    failure_fallback: "Login failed",
    redirect: Redirect {
        target: TASKS_PAGE,
        mode: NavigationMode::Replace,
        delay: Duration::from_millis(2000),
    },
    feedback: FeedbackPolicy::LOGIN,
    hide_message_on_submit: false,
    reset_on_success: false,
};

pub struct LoginController {
    form: FormController,
    store: Arc<dyn TokenStore>,
}

impl LoginController {
    /// # Errors
    /// Returns `AppError::Config` if the view lacks the `email` or `password` field.
    pub fn attach(
        view: Arc<dyn FormView>,
        navigator: Arc<dyn Navigator>,
        transport: Arc<dyn Transport>,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            form: FormController::attach(&LOGIN_FORM, view, navigator, transport)?,
            store,
        })
    }

    pub fn input(&mut self, field: &str, value: &str) -> Option<Validity> {
        self.form.input(field, value)
    }

    pub fn blur(&mut self, field: &str) -> Option<Validity> {
        self.form.blur(field)
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let store = Arc::clone(&self.store);
        self.form
            .submit(move |response| {
                let data = response.login_data()?;
                store_login(store.as_ref(), &data)
            })
            .await
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
