//! # userforms
//!
//! Client-side controllers for the Taskdesk account pages: the login form and the
//! registration form. Each controller validates its fields, posts one JSON
//! request to the users API, and drives the page feedback (loading state,
//! status banner, delayed redirect).
//!
//! ## Seams
//!
//! Controllers never touch a document or a global. They are attached to:
//!
//! - a [`forms::FormView`] exposing named fields, the submit affordance and the
//!   message element,
//! - a [`forms::Navigator`] for page changes,
//! - an [`api::Transport`] for the single `POST` per submission,
//! - a [`storage::TokenStore`] for the tokens handed back on login.
//!
//! Delayed work (message reveal/hide, redirects) is scheduled through
//! [`forms::Scheduler`] so every pending task can be listed and cancelled.
//!
//! Tokens are stored verbatim and never verified here. Payloads and tokens must
//! never be logged.

pub mod api;
pub mod cli;
pub mod config;
pub mod forms;
pub mod storage;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
