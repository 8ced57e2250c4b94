use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

use crate::headers::{HeaderMap, CONTENT_TYPE};

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
    OPTIONS,
    HEAD,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::PATCH,
        HttpMethod::DELETE,
        HttpMethod::OPTIONS,
        HttpMethod::HEAD,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::PATCH,
            HttpMethod::PATCH => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::OPTIONS,
            HttpMethod::OPTIONS => HttpMethod::HEAD,
            HttpMethod::HEAD => HttpMethod::GET,
        }
    }

    /// Methods that conventionally carry a request body
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT | HttpMethod::PATCH)
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<HttpMethod> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported request body encodings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ContentType {
    #[default]
    None,
    Json,
    Form,
    Text,
    Xml,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::None,
        ContentType::Json,
        ContentType::Form,
        ContentType::Text,
        ContentType::Xml,
    ];

    /// Selector label, as typed on the command line or shown in the form
    pub fn name(&self) -> &'static str {
        match self {
            ContentType::None => "NONE",
            ContentType::Json => "JSON",
            ContentType::Form => "FORM",
            ContentType::Text => "TEXT",
            ContentType::Xml => "XML",
        }
    }

    /// Canonical MIME string, `None` for [`ContentType::None`]
    pub fn mime(&self) -> Option<&'static str> {
        match self {
            ContentType::None => None,
            ContentType::Json => Some("application/json"),
            ContentType::Form => Some("application/x-www-form-urlencoded"),
            ContentType::Text => Some("text/plain"),
            ContentType::Xml => Some("application/xml"),
        }
    }

    pub fn next(&self) -> ContentType {
        match self {
            ContentType::None => ContentType::Json,
            ContentType::Json => ContentType::Form,
            ContentType::Form => ContentType::Text,
            ContentType::Text => ContentType::Xml,
            ContentType::Xml => ContentType::None,
        }
    }

    /// Case-insensitive lookup by label or MIME string. `PLAIN` is accepted
    /// for [`ContentType::Text`].
    pub fn from_name(name: &str) -> Option<ContentType> {
        if name.eq_ignore_ascii_case("PLAIN") {
            return Some(ContentType::Text);
        }
        Self::ALL.into_iter().find(|ct| {
            ct.name().eq_ignore_ascii_case(name)
                || ct.mime().is_some_and(|m| m.eq_ignore_ascii_case(name))
        })
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unvalidated user input for one request.
///
/// Every input surface (terminal form, command-line flags) produces this same
/// shape; nothing downstream knows where it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawFields {
    pub url: String,
    pub method: String,
    pub content_type: String,
    pub body: String,
    pub headers: String,
}

impl RawFields {
    /// Validate and assemble these fields into a [`RequestSpec`].
    pub fn build(&self) -> Result<RequestSpec, crate::error::ValidationFailed> {
        crate::builder::RequestBuilder::build(self)
    }
}

/// Request payload
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Text(String),
    Json(serde_json::Value),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Empty => true,
            Body::Text(text) => text.is_empty(),
            Body::Json(_) => false,
        }
    }

    /// Bytes to put on the wire. JSON is written compactly.
    pub fn payload(&self) -> Option<String> {
        match self {
            Body::Empty => None,
            Body::Text(text) if text.is_empty() => None,
            Body::Text(text) => Some(text.clone()),
            Body::Json(value) => Some(value.to_string()),
        }
    }
}

/// A validated request, ready to send. Only the builder creates these.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSpec {
    method: HttpMethod,
    url: String,
    headers: HeaderMap,
    body: Body,
    content_type: ContentType,
}

impl RequestSpec {
    pub(crate) fn new(
        method: HttpMethod,
        url: String,
        headers: HeaderMap,
        body: Body,
        content_type: ContentType,
    ) -> Self {
        RequestSpec {
            method,
            url,
            headers,
            body,
            content_type,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Content type picked in the selector. The effective header may differ
    /// when the user typed their own `Content-Type`.
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }
}

/// Result of one executed request
#[derive(Clone, Debug)]
pub struct ResponseSummary {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub body: String,
    pub elapsed: Duration,
    pub received_at: DateTime<Utc>,
}

impl ResponseSummary {
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE)
    }

    /// Whether the body is JSON, judged by the `Content-Type` header when
    /// present and by parsing otherwise
    pub fn is_json(&self) -> bool {
        match self.content_type() {
            Some(ct) => {
                let mime = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
                mime == "application/json" || mime.ends_with("+json")
            }
            None => serde_json::from_str::<serde_json::Value>(&self.body).is_ok(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.body.len()
    }

    /// One-line summary for status bars and CLI output
    pub fn status_line(&self) -> String {
        format!(
            "Response: Timestamp={}, Content-Type={}, Code={}, Elapsed={}ms, Size={} B.",
            self.received_at.format("%Y-%m-%dT%H:%M:%SZ"),
            self.content_type().unwrap_or("unknown"),
            self.status_code,
            self.elapsed.as_millis(),
            self.size_bytes(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_method_lookup_is_case_insensitive() {
        assert_eq!(HttpMethod::from_name("patch"), Some(HttpMethod::PATCH));
        assert_eq!(HttpMethod::from_name("Options"), Some(HttpMethod::OPTIONS));
        assert_eq!(HttpMethod::from_name("TRACE"), None);
    }

    #[test]
    fn test_method_cycle_visits_every_method() {
        let mut method = HttpMethod::GET;
        for _ in 0..HttpMethod::ALL.len() {
            method = method.next();
        }
        assert_eq!(method, HttpMethod::GET);
    }

    #[test]
    fn test_content_type_lookup() {
        assert_eq!(ContentType::from_name("json"), Some(ContentType::Json));
        assert_eq!(ContentType::from_name("PLAIN"), Some(ContentType::Text));
        assert_eq!(ContentType::from_name("application/xml"), Some(ContentType::Xml));
        assert_eq!(ContentType::from_name("yaml"), None);
        assert_eq!(ContentType::None.mime(), None);
    }

    #[test]
    fn test_json_body_payload_is_compact() {
        let body = Body::Json(serde_json::json!({"test": "value"}));
        assert_eq!(body.payload().as_deref(), Some(r#"{"test":"value"}"#));
        assert_eq!(Body::Text(String::new()).payload(), None);
        assert!(Body::Text(String::new()).is_empty());
    }

    fn summary(content_type: Option<&str>, body: &str) -> ResponseSummary {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(CONTENT_TYPE, ct);
        }
        ResponseSummary {
            status_code: 200,
            headers,
            body: body.to_string(),
            elapsed: Duration::from_millis(42),
            received_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_json_detection() {
        assert!(summary(Some("application/json; charset=utf-8"), "{}").is_json());
        assert!(summary(Some("application/problem+json"), "{}").is_json());
        assert!(!summary(Some("text/html"), "{}").is_json());
        assert!(summary(None, "[1, 2]").is_json());
        assert!(!summary(None, "ok").is_json());
    }

    #[test]
    fn test_status_line() {
        let line = summary(Some("text/plain"), "ok").status_line();
        assert_eq!(
            line,
            "Response: Timestamp=2024-05-01T12:30:00Z, Content-Type=text/plain, Code=200, Elapsed=42ms, Size=2 B."
        );
    }
}
