//! Command-line flags and the non-interactive send mode
//!
//! The flags fill the same five fields as the terminal form. Without `--send`
//! or `--dry-run` they only pre-populate the form.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::Settings;
use crate::constants::{DEFAULT_LOG_FILE, REQUEST_TIMEOUT_SECS};
use crate::curl;
use crate::models::RawFields;
use crate::network::RequestExecutor;

/// A response was obtained (any status), or a dry run was printed
pub const EXIT_OK: u8 = 0;
/// The request could not be executed: network failure, timeout, cancel
pub const EXIT_EXECUTION_FAILED: u8 = 1;
/// One or more fields failed validation
pub const EXIT_VALIDATION_FAILED: u8 = 2;

/// Assemble and send a single HTTP request
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "hreq", version, about)]
pub struct Cli {
    /// Request URL (http or https)
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// HTTP method: GET, POST, PUT, PATCH, DELETE, OPTIONS or HEAD
    #[arg(short = 'm', long)]
    pub method: Option<String>,

    /// Body content type: NONE, JSON, FORM, TEXT (or PLAIN) or XML
    #[arg(short = 't', long = "content-type")]
    pub content_type: Option<String>,

    /// Request body
    #[arg(short = 'b', long)]
    pub body: Option<String>,

    /// Request headers as a JSON object, e.g. '{"Authorization": "Bearer 123"}'
    #[arg(short = 'd', long)]
    pub headers: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = REQUEST_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Log file path
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Send the request once, print the response and exit
    #[arg(long, conflicts_with = "dry_run")]
    pub send: bool,

    /// Print the request as a cURL command and exit without sending
    #[arg(long)]
    pub dry_run: bool,

    /// With --send, print response headers before the body
    #[arg(short = 'i', long, requires = "send")]
    pub include: bool,
}

/// How the process should run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    Send,
    DryRun,
}

impl Cli {
    /// The five form fields; absent flags stay empty
    pub fn raw_fields(&self) -> RawFields {
        RawFields {
            url: self.url.clone().unwrap_or_default(),
            method: self.method.clone().unwrap_or_default(),
            content_type: self.content_type.clone().unwrap_or_default(),
            body: self.body.clone().unwrap_or_default(),
            headers: self.headers.clone().unwrap_or_default(),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            timeout: Duration::from_secs(self.timeout),
            log_file: self.log_file.clone(),
        }
    }

    pub fn mode(&self) -> Mode {
        if self.dry_run {
            Mode::DryRun
        } else if self.send {
            Mode::Send
        } else {
            Mode::Interactive
        }
    }
}

/// Print the request as cURL. Returns the process exit code.
pub fn dry_run(raw: &RawFields, out: &mut impl Write, err: &mut impl Write) -> u8 {
    match raw.build() {
        Ok(spec) => {
            let _ = writeln!(out, "{}", curl::to_curl(&spec));
            EXIT_OK
        }
        Err(e) => {
            let _ = writeln!(err, "{}", e);
            EXIT_VALIDATION_FAILED
        }
    }
}

/// Validate, send once and print the response. Returns the process exit code.
///
/// Any HTTP status counts as success; only validation and execution failures
/// produce a non-zero code.
pub async fn send_once(
    raw: &RawFields,
    executor: &RequestExecutor,
    include_headers: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8 {
    let spec = match raw.build() {
        Ok(spec) => spec,
        Err(e) => {
            tracing::info!(problems = e.causes.len(), "Request rejected by validation");
            let _ = writeln!(err, "{}", e);
            return EXIT_VALIDATION_FAILED;
        }
    };

    tracing::info!(url = %spec.url(), method = %spec.method(), "Executing request");
    match executor.execute(&spec).await {
        Ok(summary) => {
            tracing::info!(status = summary.status_code, elapsed = ?summary.elapsed, "Request completed");
            if include_headers {
                let _ = writeln!(out, "HTTP {}", summary.status_code);
                for (name, value) in summary.headers.iter() {
                    let _ = writeln!(out, "{}: {}", name, value);
                }
                let _ = writeln!(out);
            }
            let _ = write!(out, "{}", summary.body);
            if !summary.body.is_empty() && !summary.body.ends_with('\n') {
                let _ = writeln!(out);
            }
            let _ = writeln!(err, "{}", summary.status_line());
            EXIT_OK
        }
        Err(e) => {
            tracing::warn!(error = %e, "Request failed");
            let _ = writeln!(err, "{}", e);
            EXIT_EXECUTION_FAILED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_fill_raw_fields() {
        let cli = Cli::try_parse_from([
            "hreq",
            "-u",
            "http://127.0.0.1:5000",
            "-m",
            "post",
            "-t",
            "json",
            "-b",
            "{\"test\": \"value\"}",
            "-d",
            "{\"header1\": \"value1\"}",
        ])
        .unwrap();

        assert_eq!(
            cli.raw_fields(),
            RawFields {
                url: "http://127.0.0.1:5000".into(),
                method: "post".into(),
                content_type: "json".into(),
                body: "{\"test\": \"value\"}".into(),
                headers: "{\"header1\": \"value1\"}".into(),
            }
        );
        assert_eq!(cli.mode(), Mode::Interactive);
    }

    #[test]
    fn test_absent_flags_leave_fields_empty() {
        let cli = Cli::try_parse_from(["hreq", "--url", "http://x"]).unwrap();
        let raw = cli.raw_fields();
        assert_eq!(raw.method, "");
        assert_eq!(raw.headers, "");
        assert_eq!(cli.settings(), Settings {
            timeout: Duration::from_secs(30),
            log_file: PathBuf::from("hreq.log"),
        });
    }

    #[test]
    fn test_modes_and_timeout() {
        let cli = Cli::try_parse_from(["hreq", "--send", "--timeout", "5"]).unwrap();
        assert_eq!(cli.mode(), Mode::Send);
        assert_eq!(cli.settings().timeout, Duration::from_secs(5));

        let cli = Cli::try_parse_from(["hreq", "--dry-run"]).unwrap();
        assert_eq!(cli.mode(), Mode::DryRun);

        assert!(Cli::try_parse_from(["hreq", "--send", "--dry-run"]).is_err());
        assert!(Cli::try_parse_from(["hreq", "--timeout", "0"]).is_err());
        assert!(Cli::try_parse_from(["hreq", "-i"]).is_err());
    }

    #[test]
    fn test_dry_run_exit_codes() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let raw = RawFields {
            url: "https://example.com".into(),
            ..Default::default()
        };
        assert_eq!(dry_run(&raw, &mut out, &mut err), EXIT_OK);
        assert_eq!(String::from_utf8(out).unwrap(), "curl \\\n  'https://example.com'\n");

        let mut out = Vec::new();
        let mut err = Vec::new();
        let raw = RawFields {
            method: "bogus".into(),
            ..Default::default()
        };
        assert_eq!(dry_run(&raw, &mut out, &mut err), EXIT_VALIDATION_FAILED);
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("invalid URL"));
        assert!(err.contains("invalid method 'bogus'"));
    }

    #[tokio::test]
    async fn test_send_once_validation_failure_does_not_touch_network() {
        let executor = RequestExecutor::new(Duration::from_secs(1));
        let mut out = Vec::new();
        let mut err = Vec::new();
        let raw = RawFields {
            url: "not a url".into(),
            ..Default::default()
        };
        let code = send_once(&raw, &executor, false, &mut out, &mut err).await;
        assert_eq!(code, EXIT_VALIDATION_FAILED);
        assert!(!executor.is_busy());
        assert!(out.is_empty());
    }
}
