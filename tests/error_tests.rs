// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use semey_api::error::ApiError;
use serde_json::Value;

async fn body_json(error: ApiError, expose_internal: bool) -> (StatusCode, Value) {
    let response = error.render(expose_internal);
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_error_status_mapping() {
    let cases = vec![
        (ApiError::Validation("Missing required fields: name".to_string()), StatusCode::BAD_REQUEST),
        (ApiError::NotFound("Project not found".to_string()), StatusCode::NOT_FOUND),
        (ApiError::PayloadTooLarge("length limit exceeded".to_string()), StatusCode::PAYLOAD_TOO_LARGE),
        (ApiError::TooManyRequests, StatusCode::TOO_MANY_REQUESTS),
        (ApiError::Internal("lock poisoned".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (ApiError::Config("bad port".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, expected) in cases {
        assert_eq!(error.status(), expected, "{}", error);
    }
}

#[test]
fn test_config_parsing_errors_convert() {
    let error: ApiError = config::ConfigError::Message("bad value".to_string()).into();
    assert!(matches!(error, ApiError::ConfigParsing(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error.to_string().contains("bad value"));
}

#[test]
fn test_client_errors_display_their_message() {
    let error = ApiError::Validation("Missing required fields: budget".to_string());
    assert_eq!(error.to_string(), "Missing required fields: budget");

    let error = ApiError::NotFound("User not found".to_string());
    assert_eq!(error.to_string(), "User not found");
}

#[tokio::test]
async fn test_validation_envelope() {
    let (status, body) =
        body_json(ApiError::Validation("Missing required fields: name".to_string()), false).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Missing required fields: name");
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_internal_detail_suppressed_outside_development() {
    let (status, body) = body_json(ApiError::Internal("store exploded".to_string()), false).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_internal_detail_exposed_in_development() {
    let (_, body) = body_json(ApiError::Internal("store exploded".to_string()), true).await;

    assert_eq!(body["error"], "Internal server error");
    assert!(body["message"].as_str().unwrap().contains("store exploded"));
}

#[test]
fn test_into_response_never_exposes_detail() {
    let response = ApiError::Internal("secret".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
