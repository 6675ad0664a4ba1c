//! Wire types for the users API. Request bodies are flat JSON objects built from
//! form fields; responses share one envelope (`status`, `message`, `data`).
//! Token values are redacted from `Debug` output.

use super::errors::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, fmt};

/// Field name to trimmed value, serialized as a flat JSON object.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmissionPayload(BTreeMap<String, String>);

impl SubmissionPayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, trimming its value.
    #[must_use]
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.trim().to_string());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Values may be credentials, only the keys are printed.
impl fmt::Debug for SubmissionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// `status` as sent by the server: a number, a string, or anything else.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Status {
    Code(i64),
    Text(String),
    Other(Value),
}

impl Status {
    /// True only for the number `200`.
    #[must_use]
    pub fn is_numeric_ok(&self) -> bool {
        matches!(self, Status::Code(200))
    }

    /// True for the number `200` or the string `"200"`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        match self {
            Status::Code(code) => *code == 200,
            Status::Text(text) => text == "200",
            Status::Other(_) => false,
        }
    }
}

/// Response envelope shared by the users endpoints.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ServerResponse {
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ServerResponse {
    /// Server message, ignoring blank strings.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }

    /// Decodes `data` as the login result.
    ///
    /// # Errors
    /// Returns `AppError::Parse` when `data` is missing or lacks tokens or id.
    pub fn login_data(&self) -> Result<LoginData, AppError> {
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| AppError::Parse("Response is missing login data".to_string()))?;

        LoginData::deserialize(data)
            .map_err(|err| AppError::Parse(format!("Invalid login data: {err}")))
    }
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"[redacted]")
            .field("refresh", &"[redacted]")
            .finish()
    }
}

/// User identifier, sent as a string (uuid) or a plain number.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Text(text) => f.write_str(text),
            UserId::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginData {
    pub tokens: TokenPair,
    pub id: UserId,
}
