//! Error taxonomy.
//!
//! Field-level errors are collected into [`ValidationFailed`] so one build
//! attempt reports every problem at once. Execution errors end the single
//! in-flight request and are never retried.

use std::time::Duration;
use thiserror::Error;

/// A problem with one raw input field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("invalid URL '{raw}': {reason}")]
    InvalidUrl { raw: String, reason: String },

    #[error("invalid method '{raw}': expected one of GET, POST, PUT, PATCH, DELETE, OPTIONS, HEAD")]
    InvalidMethod { raw: String },

    #[error("invalid content type '{raw}': expected one of NONE, JSON, FORM, TEXT, XML")]
    InvalidContentType { raw: String },

    #[error("invalid headers: {reason}\n{raw}")]
    InvalidHeaders { raw: String, reason: String },

    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },
}

impl FieldError {
    /// Name of the input field this error refers to
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::InvalidUrl { .. } => "url",
            FieldError::InvalidMethod { .. } => "method",
            FieldError::InvalidContentType { .. } => "content_type",
            FieldError::InvalidHeaders { .. } => "headers",
            FieldError::InvalidBody { .. } => "body",
        }
    }
}

/// Every field-level error from one build attempt, in field order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request validation failed {}", describe_causes(.causes))]
pub struct ValidationFailed {
    pub causes: Vec<FieldError>,
}

fn describe_causes(causes: &[FieldError]) -> String {
    let plural = if causes.len() == 1 { "" } else { "s" };
    let mut text = format!("({} problem{})", causes.len(), plural);
    for cause in causes {
        text.push_str(&format!("\n  - {}", cause));
    }
    text
}

/// Failure while executing a validated request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("another request is already in flight")]
    RequestInFlight,

    #[error("request cancelled")]
    Cancelled,
}

/// Any failure between raw input and a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationFailed),

    #[error(transparent)]
    Execute(#[from] ExecuteError),
}
