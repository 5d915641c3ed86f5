//! Revu - terminal client for a code-review sharing board
//!
//! Members sign up and log in, post code reviews tagged by language or
//! framework, mark them solved/unsolved, and comment. All business logic
//! lives behind the backend REST API; this crate is the presentation layer:
//! an HTTP client wrapper, a session store, a content renderer for fenced
//! code blocks, and keyboard-driven ratatui views.
//!
//! ## Architecture
//!
//! The app loop owns all view state ([`app::App`]). Page controllers enqueue
//! [`app::ApiCmd`] commands; the API task ([`source_api`]) executes them and
//! answers with [`app::AppEvent`] results. The session ([`session::Session`])
//! is an explicit value threaded through the app — the persisted access
//! token ([`token_store::TokenStore`]) is the only durable client state.

pub mod app;
pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod session;
pub mod source_api;
pub mod token_store;
pub mod validate;

// Terminal-facing modules
pub mod clipboard;
pub mod ui;

// Re-export commonly used types
pub use app::{ApiCmd, App, AppEvent, Route};
pub use client::{ApiClient, PostQuery};
pub use error::ApiError;
pub use session::{Session, SessionState};
