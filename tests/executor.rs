//! Executes built requests against a local axum fixture server.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::SET_COOKIE, HeaderMap as AxumHeaders, Method, StatusCode},
    response::AppendHeaders,
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};

use hreq::{ExecuteError, HttpMethod, RawFields, RequestExecutor, RequestSpec};

async fn ok() -> &'static str {
    "ok"
}

async fn echo(method: Method, headers: AxumHeaders, body: String) -> Json<Value> {
    let headers: serde_json::Map<String, Value> = headers
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), json!(v.to_str().unwrap_or_default())))
        .collect();
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "body": body,
    }))
}

async fn missing() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "no such thing")
}

async fn cookies() -> (AppendHeaders<[(axum::http::HeaderName, &'static str); 2]>, &'static str) {
    (AppendHeaders([(SET_COOKIE, "a=1"), (SET_COOKIE, "b=2")]), "cookies")
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(10)).await;
    "too late"
}

fn fixture() -> Router {
    Router::new()
        .route("/", any(ok))
        .route("/echo", any(echo))
        .route("/missing", any(missing))
        .route("/cookies", any(cookies))
        .route("/slow", any(slow))
}

/// Start the fixture on an ephemeral port and return its base URL
async fn spawn_fixture() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, fixture()).await.unwrap();
    });
    format!("http://{addr}")
}

fn build(url: String, method: &str, content_type: &str, body: &str, headers: &str) -> RequestSpec {
    RawFields {
        url,
        method: method.to_string(),
        content_type: content_type.to_string(),
        body: body.to_string(),
        headers: headers.to_string(),
    }
    .build()
    .unwrap()
}

fn get(url: String) -> RequestSpec {
    build(url, "", "", "", "")
}

#[tokio::test]
async fn end_to_end_example() {
    let base = spawn_fixture().await;
    let spec = build(
        base,
        "POST",
        "JSON",
        "{\"test\": \"value\"}",
        "{\"header1\": \"value1\"}",
    );
    assert_eq!(spec.method(), HttpMethod::POST);

    let summary = RequestExecutor::default().execute(&spec).await.unwrap();
    assert_eq!(summary.status_code, 200);
    assert_eq!(summary.body, "ok");
    assert!(summary.elapsed > Duration::ZERO);
}

#[tokio::test]
async fn request_is_sent_verbatim() {
    let base = spawn_fixture().await;
    let spec = build(
        format!("{base}/echo"),
        "put",
        "JSON",
        "{ \"test\" :   \"value\" }",
        "{\"header1\": \"value1\", \"X-Count\": 3}",
    );

    let summary = RequestExecutor::default().execute(&spec).await.unwrap();
    assert!(summary.is_json());
    let echoed: Value = serde_json::from_str(&summary.body).unwrap();
    assert_eq!(echoed["method"], "PUT");
    assert_eq!(echoed["headers"]["content-type"], "application/json");
    assert_eq!(echoed["headers"]["header1"], "value1");
    assert_eq!(echoed["headers"]["x-count"], "3");
    assert_eq!(echoed["body"], r#"{"test":"value"}"#);
}

#[tokio::test]
async fn user_content_type_reaches_the_server() {
    let base = spawn_fixture().await;
    let spec = build(
        format!("{base}/echo"),
        "POST",
        "JSON",
        "{\"a\": 1}",
        "{\"Content-Type\": \"text/plain\"}",
    );

    let summary = RequestExecutor::default().execute(&spec).await.unwrap();
    let echoed: Value = serde_json::from_str(&summary.body).unwrap();
    assert_eq!(echoed["headers"]["content-type"], "text/plain");
}

#[tokio::test]
async fn form_body_is_sent_as_typed() {
    let base = spawn_fixture().await;
    let spec = build(format!("{base}/echo"), "PATCH", "form", "a=1&b=two", "");

    let summary = RequestExecutor::default().execute(&spec).await.unwrap();
    let echoed: Value = serde_json::from_str(&summary.body).unwrap();
    assert_eq!(echoed["headers"]["content-type"], "application/x-www-form-urlencoded");
    assert_eq!(echoed["body"], "a=1&b=two");
}

#[tokio::test]
async fn error_status_is_still_a_response() {
    let base = spawn_fixture().await;
    let summary = RequestExecutor::default()
        .execute(&get(format!("{base}/missing")))
        .await
        .unwrap();
    assert_eq!(summary.status_code, 404);
    assert_eq!(summary.body, "no such thing");
}

#[tokio::test]
async fn repeated_response_headers_are_joined() {
    let base = spawn_fixture().await;
    let summary = RequestExecutor::default()
        .execute(&get(format!("{base}/cookies")))
        .await
        .unwrap();
    assert_eq!(summary.headers.get("Set-Cookie"), Some("a=1, b=2"));
}

#[tokio::test]
async fn head_request_has_empty_body() {
    let base = spawn_fixture().await;
    let spec = build(base, "HEAD", "", "", "");
    let summary = RequestExecutor::default().execute(&spec).await.unwrap();
    assert_eq!(summary.status_code, 200);
    assert!(summary.body.is_empty());
}

#[tokio::test]
async fn timeout_then_resend_is_permitted() {
    let base = spawn_fixture().await;
    let timeout = Duration::from_millis(200);
    let executor = RequestExecutor::new(timeout);

    let err = executor.execute(&get(format!("{base}/slow"))).await.unwrap_err();
    assert_eq!(err, ExecuteError::Timeout(timeout));
    assert!(!executor.is_busy());

    let summary = executor.execute(&get(base)).await.unwrap();
    assert_eq!(summary.body, "ok");
}

#[tokio::test]
async fn connection_failure_is_a_network_error() {
    // Reserve a port, then close it so nothing is listening
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let err = RequestExecutor::default()
        .execute(&get(format!("http://127.0.0.1:{port}/")))
        .await
        .unwrap_err();
    assert!(matches!(err, ExecuteError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn second_request_is_rejected_until_first_is_cancelled() {
    let base = spawn_fixture().await;
    let executor = Arc::new(RequestExecutor::new(Duration::from_secs(30)));

    let first = {
        let executor = executor.clone();
        let spec = get(format!("{base}/slow"));
        tokio::spawn(async move { executor.execute(&spec).await })
    };

    while !executor.is_busy() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let err = executor.execute(&get(base.clone())).await.unwrap_err();
    assert_eq!(err, ExecuteError::RequestInFlight);

    assert!(executor.cancel());
    let outcome = first.await.unwrap();
    assert_eq!(outcome.unwrap_err(), ExecuteError::Cancelled);
    assert!(!executor.is_busy());

    let summary = executor.execute(&get(base)).await.unwrap();
    assert_eq!(summary.status_code, 200);
}
