//! Client configuration for the users API and the local token store. Values come
//! from the CLI (or its environment variables) and are normalised here: blank
//! strings count as unset and base URLs must be absolute http(s) URLs.
//! Configuration values are public; do not store secrets here.

use crate::api::AppError;
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Default request timeout applied by the CLI, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// [`DEFAULT_TIMEOUT_SECS`] as the CLI default value.
pub const DEFAULT_TIMEOUT: &str = "10";
/// Default location of the JSON token store used by the CLI.
pub const DEFAULT_STORE_PATH: &str = "userforms-session.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Option<Duration>,
    pub store_path: PathBuf,
}

impl ClientConfig {
    /// Builds a config for the given API base URL with no request timeout.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the URL is blank, unparsable, or not http(s).
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = normalize_value(base_url)
            .ok_or_else(|| AppError::Config("API base URL is required".to_string()))?;

        let parsed = Url::parse(&base_url)
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(AppError::Config(format!(
                    "Invalid API base URL: unsupported scheme {scheme}"
                )))
            }
        }

        if parsed.host().is_none() {
            return Err(AppError::Config(
                "Invalid API base URL: no host specified".to_string(),
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: None,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        })
    }

    /// Sets the request timeout in seconds; `0` disables it.
    #[must_use]
    pub fn with_timeout_secs(mut self, seconds: u64) -> Self {
        self.request_timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        self
    }

    /// Sets the token store path; blank paths keep the current one.
    #[must_use]
    pub fn with_store_path(mut self, path: &str) -> Self {
        if let Some(path) = normalize_value(path) {
            self.store_path = PathBuf::from(path);
        }
        self
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  https://tasks.example.com "),
            Some("https://tasks.example.com".to_string())
        );
    }

    #[test]
    fn new_strips_trailing_slash() -> Result<()> {
        let config = ClientConfig::new(" https://tasks.example.com/ ")?;
        assert_eq!(config.base_url, "https://tasks.example.com");
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        Ok(())
    }

    #[test]
    fn new_rejects_blank_and_unsupported_urls() {
        assert!(matches!(ClientConfig::new("  "), Err(AppError::Config(_))));
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(AppError::Config(_))
        ));

        let err = ClientConfig::new("ftp://tasks.example.com").err();
        assert!(err
            .map(|err| err.to_string().contains("unsupported scheme"))
            .unwrap_or(false));
    }

    #[test]
    fn timeout_zero_disables() -> Result<()> {
        let config = ClientConfig::new("http://localhost:8000")?.with_timeout_secs(0);
        assert_eq!(config.request_timeout, None);

        let config = config.with_timeout_secs(DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
        Ok(())
    }

    #[test]
    fn blank_store_path_keeps_default() -> Result<()> {
        let config = ClientConfig::new("http://localhost:8000")?.with_store_path("  ");
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));

        let config = config.with_store_path("/tmp/session.json");
        assert_eq!(config.store_path, PathBuf::from("/tmp/session.json"));
        Ok(())
    }
}
