//! HTTP executor - sends one validated request and summarizes the response

use std::error::Error as _;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::Notify;

use crate::constants::{APP_NAME, APP_VERSION, REQUEST_TIMEOUT_SECS};
use crate::error::ExecuteError;
use crate::headers::HeaderMap;
use crate::models::{HttpMethod, RequestSpec, ResponseSummary};

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
            HttpMethod::HEAD => reqwest::Method::HEAD,
        }
    }
}

type Slot = Mutex<Option<Arc<Notify>>>;

/// Holds the in-flight slot for the lifetime of one execution
struct InFlight<'a> {
    slot: &'a Slot,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *lock(self.slot) = None;
    }
}

fn lock(slot: &Slot) -> MutexGuard<'_, Option<Arc<Notify>>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sends validated requests, one at a time.
///
/// A second [`execute`](Self::execute) while one is outstanding is rejected
/// with [`ExecuteError::RequestInFlight`]; the caller decides whether to wait
/// or [`cancel`](Self::cancel).
pub struct RequestExecutor {
    client: reqwest::Client,
    timeout: Duration,
    in_flight: Slot,
}

impl Default for RequestExecutor {
    fn default() -> Self {
        Self::new(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }
}

impl RequestExecutor {
    pub fn new(timeout: Duration) -> Self {
        RequestExecutor {
            client: create_client(timeout),
            timeout,
            in_flight: Mutex::new(None),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether a request is currently outstanding
    pub fn is_busy(&self) -> bool {
        lock(&self.in_flight).is_some()
    }

    /// Abort the outstanding request, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        match lock(&self.in_flight).as_ref() {
            Some(notify) => {
                notify.notify_one();
                true
            }
            None => false,
        }
    }

    fn begin(&self) -> Result<(InFlight<'_>, Arc<Notify>), ExecuteError> {
        let mut slot = lock(&self.in_flight);
        if slot.is_some() {
            return Err(ExecuteError::RequestInFlight);
        }
        let notify = Arc::new(Notify::new());
        *slot = Some(notify.clone());
        Ok((InFlight { slot: &self.in_flight }, notify))
    }

    /// Perform exactly one round trip for `spec`. Non-2xx statuses are
    /// successful executions.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<ResponseSummary, ExecuteError> {
        let (_in_flight, cancelled) = self.begin()?;

        tokio::select! {
            biased;

            _ = cancelled.notified() => {
                tracing::info!(url = %spec.url(), "Request cancelled");
                Err(ExecuteError::Cancelled)
            }
            result = tokio::time::timeout(self.timeout, self.round_trip(spec)) => {
                match result {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        tracing::warn!(url = %spec.url(), timeout = ?self.timeout, "Request timed out");
                        Err(ExecuteError::Timeout(self.timeout))
                    }
                }
            }
        }
    }

    async fn round_trip(&self, spec: &RequestSpec) -> Result<ResponseSummary, ExecuteError> {
        let start = Instant::now();

        let mut req_builder = self.client.request(spec.method().into(), spec.url());
        for (name, value) in spec.headers().iter() {
            req_builder = req_builder.header(name, value);
        }
        if let Some(payload) = spec.body().payload() {
            req_builder = req_builder.body(payload);
        }

        let resp = req_builder.send().await.map_err(|e| self.classify(e))?;
        let status_code = resp.status().as_u16();

        let mut headers = HeaderMap::new();
        for (name, value) in resp.headers() {
            headers.append_joined(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }

        let body = resp.text().await.map_err(|e| self.classify(e))?;

        Ok(ResponseSummary {
            status_code,
            headers,
            body,
            elapsed: start.elapsed(),
            received_at: Utc::now(),
        })
    }

    fn classify(&self, e: reqwest::Error) -> ExecuteError {
        if e.is_timeout() {
            return ExecuteError::Timeout(self.timeout);
        }
        let mut message = if e.is_connect() {
            format!("connection failed: {}", e)
        } else {
            e.to_string()
        };
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ExecuteError::Network(message)
    }
}

/// Create an HTTP client with default configuration
fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(format!("{}/{}", APP_NAME, APP_VERSION))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
