//! `AppError` to HTTP response mapping.
//!
//! These call `IntoResponse` directly; no router is involved.

use ascend_api::error::AppError;
use ascend_core::error::CoreError;
use ascend_db::StoreError;
use ascend_events::SmsError;
use ascend_gateway::GatewayError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let (status, json) = error_to_response(CoreError::not_found("Booking", "b-42").into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Booking with id b-42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = CoreError::Validation("fullName is required".into());
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "fullName is required");
}

#[tokio::test]
async fn invalid_phone_returns_400_with_own_code() {
    let err = CoreError::InvalidPhoneFormat("mobile must contain exactly 10 digits".into());
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_PHONE_FORMAT");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = CoreError::Conflict("booking status cannot change".into());
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn verification_failure_carries_success_false() {
    let (status, json) =
        error_to_response(AppError::VerificationFailed("Invalid payment signature".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VERIFICATION_FAILED");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid payment signature");
}

#[tokio::test]
async fn gateway_error_returns_502_without_provider_text() {
    let err = GatewayError::Api {
        status: 401,
        body: "key_secret rzp_live_abc is invalid".into(),
    };
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "GATEWAY_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("rzp_live"));
}

#[tokio::test]
async fn gateway_invalid_request_is_a_validation_error() {
    let err = GatewayError::InvalidRequest("customerEmail is required".into());
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn sms_provider_error_returns_502() {
    let err = SmsError::Api {
        status: 500,
        body: "twilio internals".into(),
    };
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "CHANNEL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("twilio"));
}

#[tokio::test]
async fn store_duplicate_returns_409() {
    let err = StoreError::Duplicate {
        entity: "Package",
        key: "ascend-professional".into(),
    };
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn store_backend_error_is_sanitized() {
    let err = StoreError::Backend("connection refused to 10.0.0.5".into());
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn not_configured_returns_503() {
    let (status, json) = error_to_response(AppError::NotConfigured("SMS delivery")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "NOT_CONFIGURED");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let (status, json) =
        error_to_response(AppError::InternalError("secret credentials leaked".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("secret"));
}
