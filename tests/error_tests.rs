// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use vertex_llm::error::LlmError;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        LlmError::InvalidRequest("Bad request".to_string()),
        LlmError::UpstreamAuth("Denied".to_string()),
        LlmError::Generation("Failed".to_string()),
        LlmError::MalformedResponse("No candidates".to_string()),
        LlmError::Upstream("HTTP 503".to_string()),
        LlmError::Credentials("no ADC".to_string()),
        LlmError::Config("bad port".to_string()),
        LlmError::Internal("oops".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_status_mapping() {
    assert_eq!(
        LlmError::InvalidRequest("x".to_string()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        LlmError::UpstreamAuth("x".to_string()).status_code(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        LlmError::Generation("x".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        LlmError::MalformedResponse("x".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        LlmError::Internal("x".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_credentials_error_carries_auth_marker() {
    let error = LlmError::Credentials("token expired".to_string());
    assert!(error.is_auth_failure());
    assert!(format!("{}", error).contains("token expired"));
}

#[test]
fn test_plain_upstream_error_is_not_auth() {
    let error = LlmError::Upstream("HTTP 429: RESOURCE_EXHAUSTED".to_string());
    assert!(!error.is_auth_failure());
}

#[test]
fn test_empty_message_falls_back() {
    let error = LlmError::Internal(String::new());
    assert_eq!(error.public_message(), "Internal Server Error");
}

#[tokio::test]
async fn test_into_response_body_shape() {
    let response = LlmError::MalformedResponse("No response received from Vertex AI.".to_string())
        .into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "error": "No response received from Vertex AI." })
    );
}
