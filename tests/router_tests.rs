// HTTP surface tests driven through the axum router
// Author: kelexine (https://github.com/kelexine)

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::ScriptedClient;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use vertex_llm::config::AppConfig;
use vertex_llm::server::create_router;

fn app(client: std::sync::Arc<ScriptedClient>) -> Router {
    create_router(AppConfig::default(), client)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/llm")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_get_returns_usage_message() {
    let client = ScriptedClient::failing("unused");
    let request = Request::builder().uri("/llm").body(Body::empty()).unwrap();

    let (status, body) = send(app(client.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Use POST with JSON { prompt: 'your text' }" }));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_post_returns_answer() {
    let client = ScriptedClient::answering(&["Hello", "world"]);

    let (status, body) = send(app(client), post(r#"{"prompt":"hi"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "answer": "Hello world" }));
}

#[tokio::test]
async fn test_post_without_prompt_is_400() {
    let client = ScriptedClient::answering(&["unused"]);

    let (status, body) = send(app(client.clone()), post(r#"{"text":"hi"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing `prompt` in request body." }));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_oversized_body_is_json_400() {
    let client = ScriptedClient::answering(&["unused"]);
    let mut config = AppConfig::default();
    config.server.body_limit_bytes = 16;
    let router = create_router(config, client.clone());

    let (status, body) = send(router, post(format!(r#"{{"prompt":"{}"}}"#, "x".repeat(64)))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_permission_denied_is_403_json() {
    let client = ScriptedClient::failing("HTTP 403 Forbidden: PERMISSION_DENIED");

    let (status, body) = send(app(client), post(r#"{"prompt":"hi"}"#)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("gcloud auth application-default login"));
}

#[tokio::test]
async fn test_generic_failure_is_500_json() {
    let client = ScriptedClient::failing("HTTP error: connection reset");

    let (status, body) = send(app(client), post(r#"{"prompt":"hi"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to generate content from Vertex AI." }));
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let client = ScriptedClient::answering(&["ok"]);
    let response = app(client)
        .oneshot(post(r#"{"prompt":"hi"}"#))
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_health_reports_upstream_target() {
    let client = ScriptedClient::answering(&["unused"]);
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(app(client), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "vertex-llm");
    assert_eq!(body["project_id"], "welcome-study-project");
    assert_eq!(body["location"], "us-central1");
    assert_eq!(body["text_model"], "gemini-1.0-pro");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_request_counter() {
    let client = ScriptedClient::answering(&["ok"]);
    let router = app(client);

    router.clone().oneshot(post(r#"{"prompt":"hi"}"#)).await.unwrap();

    let response = router
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("llm_requests_total"));
}
