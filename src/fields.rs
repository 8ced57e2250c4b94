//! Field parsers - turn raw form strings into validated values
//!
//! Each parser looks at exactly one field and has no side effects.

use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

use crate::error::FieldError;
use crate::headers::HeaderMap;
use crate::models::{Body, ContentType, HttpMethod};

/// Parse the headers field: a JSON object of names to strings, numbers or
/// booleans. Blank input means no headers.
pub fn parse_headers(raw: &str) -> Result<HeaderMap, FieldError> {
    if raw.trim().is_empty() {
        return Ok(HeaderMap::new());
    }

    let invalid = |reason: String| FieldError::InvalidHeaders {
        raw: raw.to_string(),
        reason,
    };

    let headers: HeaderMap = serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;

    for (name, value) in headers.iter() {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| invalid(format!("'{}' is not a valid header name", name)))?;
        HeaderValue::from_str(value)
            .map_err(|_| invalid(format!("value of header '{}' is not a valid header value", name)))?;
    }

    Ok(headers)
}

/// Parse the body field for the selected content type. Blank input means no
/// body; anything else is kept verbatim unless it is JSON.
pub fn parse_body(raw: &str, content_type: ContentType) -> Result<Body, FieldError> {
    if raw.trim().is_empty() {
        return Ok(Body::Empty);
    }

    match content_type {
        ContentType::Json => serde_json::from_str(raw)
            .map(Body::Json)
            .map_err(|e| FieldError::InvalidBody {
                reason: format!("not valid JSON: {}", e),
            }),
        _ => Ok(Body::Text(raw.to_string())),
    }
}

/// Parse the URL field: an absolute http(s) URL with a host.
pub fn parse_url(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    let invalid = |reason: &str| FieldError::InvalidUrl {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("URL is empty"));
    }

    let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("URL has no host"));
    }

    Ok(trimmed.to_string())
}

/// Parse the method field. Blank input means GET.
pub fn parse_method(raw: &str) -> Result<HttpMethod, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(HttpMethod::GET);
    }
    HttpMethod::from_name(trimmed).ok_or_else(|| FieldError::InvalidMethod {
        raw: raw.to_string(),
    })
}

/// Parse the content type selector. Blank input means no content type.
pub fn parse_content_type(raw: &str) -> Result<ContentType, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(ContentType::None);
    }
    ContentType::from_name(trimmed).ok_or_else(|| FieldError::InvalidContentType {
        raw: raw.to_string(),
    })
}
