//! Request builder - assembles raw fields into a validated [`RequestSpec`]

use crate::error::{FieldError, ValidationFailed};
use crate::fields::{parse_body, parse_content_type, parse_headers, parse_method, parse_url};
use crate::headers::CONTENT_TYPE;
use crate::models::{ContentType, RawFields, RequestSpec};

/// Stateless builder for [`RequestSpec`] values
pub struct RequestBuilder;

impl RequestBuilder {
    /// Validate every field and assemble the request.
    ///
    /// Each field is parsed on its own and all failures are returned
    /// together, ordered url, method, content type, headers, body. A
    /// `Content-Type` typed into the headers always beats the one implied by
    /// the selected content type.
    pub fn build(raw: &RawFields) -> Result<RequestSpec, ValidationFailed> {
        let url = parse_url(&raw.url);
        let method = parse_method(&raw.method);
        let content_type = parse_content_type(&raw.content_type);
        let headers = parse_headers(&raw.headers);
        let body_strategy = content_type.as_ref().copied().unwrap_or(ContentType::None);
        let body = parse_body(&raw.body, body_strategy);

        let mut causes = Vec::new();
        let url = url.map_err(|e| causes.push(e)).ok();
        let method = method.map_err(|e| causes.push(e)).ok();
        let content_type = content_type.map_err(|e| causes.push(e)).ok();
        let headers = headers.map_err(|e| causes.push(e)).ok();
        let body = body.map_err(|e| causes.push(e)).ok();

        if let (Some(method), Some(ContentType::None), Some(body)) = (method, content_type, &body) {
            if !body.is_empty() && !method.allows_body() {
                causes.push(FieldError::InvalidBody {
                    reason: format!(
                        "a {} request without a content type cannot carry a body",
                        method
                    ),
                });
            }
        }

        match (url, method, content_type, headers, body) {
            (Some(url), Some(method), Some(content_type), Some(mut headers), Some(body))
                if causes.is_empty() =>
            {
                if let Some(mime) = content_type.mime() {
                    if !headers.contains(CONTENT_TYPE) {
                        headers.insert(CONTENT_TYPE, mime);
                    }
                }
                Ok(RequestSpec::new(method, url, headers, body, content_type))
            }
            _ => Err(ValidationFailed { causes }),
        }
    }
}
