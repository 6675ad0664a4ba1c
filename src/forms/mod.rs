//! Form controllers for the account pages.
//!
//! Both forms share one shape: field validation, a single submission cycle and
//! a status banner. [`LoginController`] and [`RegistrationController`] bind that
//! shape to their own fields, endpoint, messages and timings.

pub mod controller;
pub mod feedback;
pub mod field;
pub mod login;
pub mod register;
pub mod schedule;
pub mod submission;
pub mod validator;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use self::controller::{FormController, FormKind, FormSpec};
pub use self::feedback::{FeedbackPolicy, FeedbackPresenter};
pub use self::field::{Field, FieldKind, FieldSpec, Validity};
pub use self::login::{LoginController, LOGIN_FORM, TASKS_PAGE};
pub use self::register::{RegistrationController, LOGIN_PAGE, REGISTRATION_FORM};
pub use self::schedule::{Scheduler, TaskHandle, TaskKind};
pub use self::submission::{FailureKind, SubmissionState, SubmitOutcome, SuccessRule};
pub use self::validator::Ruleset;
pub use self::view::{
    FormView, MemoryView, Message, MessageKind, NavigationMode, Navigator, UiState,
};
