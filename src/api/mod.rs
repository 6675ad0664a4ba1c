//! HTTP access to the users API. Controllers only see the [`Transport`] seam; the
//! reqwest-backed [`HttpTransport`] posts JSON and decodes the shared response
//! envelope. The envelope's `status` field decides success, so an envelope is
//! returned whatever the HTTP status; only bodies that are not an envelope are
//! turned into errors. Payloads must never be logged.

pub mod errors;
pub mod types;

pub use self::errors::AppError;
pub use self::types::{LoginData, ServerResponse, Status, SubmissionPayload, TokenPair, UserId};

use crate::{config::ClientConfig, APP_USER_AGENT};
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, StatusCode};
use tracing::{debug, instrument};

/// Login endpoint, body `{email, password}`.
pub const LOGIN_PATH: &str = "/users/login/";
/// Registration endpoint, body `{first_name, last_name, email, password}`.
pub const REGISTER_PATH: &str = "/users/register/";

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Issues the single request of a submission cycle.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts `payload` as JSON to `path` and returns the decoded envelope.
    async fn post_json(
        &self,
        path: &str,
        payload: &SubmissionPayload,
    ) -> Result<ServerResponse, AppError>;
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder().user_agent(APP_USER_AGENT);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, payload))]
    async fn post_json(
        &self,
        path: &str,
        payload: &SubmissionPayload,
    ) -> Result<ServerResponse, AppError> {
        let url = build_url_with_base(&self.base_url, path);

        debug!("POST {url} fields: {payload:?}");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_request_error)?;

        debug!("response status: {status}");

        decode_envelope(status, &body)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_decode() {
        AppError::Parse(format!("Failed to read response: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Decodes the response envelope; non-envelope bodies become errors.
fn decode_envelope(status: StatusCode, body: &str) -> Result<ServerResponse, AppError> {
    match serde_json::from_str::<ServerResponse>(body) {
        Ok(envelope) => Ok(envelope),
        Err(err) if status.is_success() => {
            Err(AppError::Parse(format!("Failed to decode response: {err}")))
        }
        Err(_) => Err(AppError::Http {
            status: status.as_u16(),
            message: sanitize_body(body),
        }),
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
