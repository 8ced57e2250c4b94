use crate::models::{HttpMethod, RequestSpec};

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Format a validated request as a cURL command
pub fn to_curl(spec: &RequestSpec) -> String {
    let mut parts = vec!["curl".to_string()];

    // Method
    match spec.method() {
        HttpMethod::GET => {}
        HttpMethod::HEAD => parts.push("-I".to_string()),
        method => parts.push(format!("-X {}", method.as_str())),
    }

    // URL
    parts.push(quote(spec.url()));

    // Headers
    for (name, value) in spec.headers().iter() {
        parts.push(format!("-H {}", quote(&format!("{}: {}", name, value))));
    }

    // Body
    if let Some(payload) = spec.body().payload() {
        parts.push(format!("--data-raw {}", quote(&payload)));
    }

    parts.join(" \\\n  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawFields;

    #[test]
    fn test_simple_get() {
        let spec = RawFields {
            url: "https://api.example.com/users".into(),
            ..Default::default()
        }
        .build()
        .unwrap();
        assert_eq!(to_curl(&spec), "curl \\\n  'https://api.example.com/users'");
    }

    #[test]
    fn test_post_with_json_body() {
        let spec = RawFields {
            url: "https://api.example.com/users".into(),
            method: "post".into(),
            content_type: "json".into(),
            body: r#"{ "name": "o'neil" }"#.into(),
            headers: r#"{"X-Trace": "1"}"#.into(),
        }
        .build()
        .unwrap();
        let text = to_curl(&spec);
        let lines: Vec<&str> = text.split(" \\\n  ").collect();
        assert_eq!(
            lines,
            vec![
                "curl",
                "-X POST",
                "'https://api.example.com/users'",
                "-H 'X-Trace: 1'",
                "-H 'Content-Type: application/json'",
                r#"--data-raw '{"name":"o'\''neil"}'"#,
            ]
        );
    }
}
