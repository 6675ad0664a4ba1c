//! Test doubles for controller tests.

use crate::{
    api::{AppError, ServerResponse, SubmissionPayload, Transport},
    storage::TokenStore,
};
use async_trait::async_trait;
use serde_json::Value;
use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};

/// Answers each request with the next scripted result and records the call.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ServerResponse, AppError>>>,
    calls: Mutex<Vec<(String, SubmissionPayload)>>,
}

impl ScriptedTransport {
    pub fn replying(reply: Result<ServerResponse, AppError>) -> Self {
        let transport = Self::default();
        transport.push(reply);
        transport
    }

    /// Replies with the given JSON envelope.
    pub fn replying_json(value: Value) -> Self {
        Self::replying(
            serde_json::from_value(value)
                .map_err(|err| AppError::Parse(format!("bad test envelope: {err}"))),
        )
    }

    pub fn push(&self, reply: Result<ServerResponse, AppError>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<(String, SubmissionPayload)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(
        &self,
        path: &str,
        payload: &SubmissionPayload,
    ) -> Result<ServerResponse, AppError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path.to_string(), payload.clone()));

        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Network("no scripted reply".to_string())))
    }
}

/// Store that rejects every write.
#[derive(Debug, Default)]
pub struct FailingStore;

impl TokenStore for FailingStore {
    fn set_item(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::Storage("quota exceeded".to_string()))
    }

    fn get_item(&self, _key: &str) -> Result<Option<String>, AppError> {
        Ok(None)
    }
}
