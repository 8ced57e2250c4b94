//! # H-Req
//!
//! Assemble, validate and send a single HTTP request, then look at the
//! response.
//!
//! ## Pipeline
//! - [`RawFields`] - the five strings a user typed (form or CLI flags)
//! - [`fields`] - one parser per field
//! - [`RequestBuilder`] - collects every field error, merges `Content-Type`,
//!   yields an immutable [`RequestSpec`]
//! - [`RequestExecutor`] - one round trip, one in-flight request at a time,
//!   yields a [`ResponseSummary`]
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod config;
pub mod error;
pub mod headers;
pub mod models;
pub mod fields;
pub mod builder;
pub mod curl;
pub mod cli;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use builder::RequestBuilder;
pub use config::Settings;
pub use curl::to_curl;
pub use error::{Error, ExecuteError, FieldError, ValidationFailed};
pub use headers::HeaderMap;
pub use models::{Body, ContentType, HttpMethod, RawFields, RequestSpec, ResponseSummary};
pub use network::{NetworkActor, RequestExecutor};
pub use app::{AppActor, AppState};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
