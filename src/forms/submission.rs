//! Submission cycle types: the handler states, the outcome handed back to the
//! caller, and the rules that decide whether a response counts as success.

use crate::api::ServerResponse;

/// Message that, on its own, marks a registration as successful.
pub const REGISTRATION_SUCCESS_MESSAGE: &str = "REGISTRATION_SUCCESSFUL";
/// Shown for transport failures and malformed responses.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// `Idle → Validating → Submitting → {Succeeded, Failed} → Idle`
///
/// The terminal state stays observable until the next submission starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The server answered with a non-success status.
    Server,
    /// The request failed, the response was malformed, or the success step failed.
    Transport,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was already loading; nothing happened.
    Ignored,
    /// Client-side validation failed; no request was sent.
    Rejected,
    Succeeded,
    Failed(FailureKind),
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_success(self) -> bool {
        self == SubmitOutcome::Succeeded
    }
}

/// How a response envelope is judged successful.
///
/// The two forms disagree: login only trusts the number `200`, registration
/// also takes `"200"` or the success message. Both rules are kept as served.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuccessRule {
    /// `status` is the number `200`.
    StrictStatus,
    /// `status` is `200` or `"200"`, or `message` is the registration sentinel.
    Tolerant,
}

impl SuccessRule {
    #[must_use]
    pub fn is_success(self, response: &ServerResponse) -> bool {
        match self {
            SuccessRule::StrictStatus => response
                .status
                .as_ref()
                .is_some_and(|status| status.is_numeric_ok()),
            SuccessRule::Tolerant => {
                response.status.as_ref().is_some_and(|status| status.is_ok())
                    || response.message.as_deref() == Some(REGISTRATION_SUCCESS_MESSAGE)
            }
        }
    }
}
