//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Application name
pub const APP_NAME: &str = "H-Req";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder shown in an empty URL field
pub const URL_PLACEHOLDER: &str = "http://www.example.com:8080/endpoint/123";

/// Default per-request timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "hreq.log";

/// Separator used when a response repeats a header name
pub const HEADER_JOIN_SEPARATOR: &str = ", ";
