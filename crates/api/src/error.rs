use ascend_core::error::CoreError;
use ascend_db::StoreError;
use ascend_events::SmsError;
use ascend_gateway::GatewayError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `ascend_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage backend fault.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The payment gateway could not raise an order.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// A direct SMS request failed.
    #[error("SMS error: {0}")]
    Sms(#[from] SmsError),

    /// A payment signature did not match.
    #[error("Payment verification failed: {0}")]
    VerificationFailed(String),

    /// A feature whose provider is not configured was requested.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidPhoneFormat(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_PHONE_FORMAT", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(StoreError::Duplicate { entity, key }) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("{entity} '{key}' already exists"),
            ),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }

            // --- Provider errors ---
            AppError::Gateway(GatewayError::InvalidRequest(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Gateway(err) => {
                tracing::error!(error = %err, "Payment gateway error");
                (
                    StatusCode::BAD_GATEWAY,
                    "GATEWAY_ERROR",
                    "Unable to create payment order".to_string(),
                )
            }
            AppError::Sms(SmsError::InvalidNumber(number)) => (
                StatusCode::BAD_REQUEST,
                "INVALID_PHONE_FORMAT",
                format!("'{number}' is not a valid phone number"),
            ),
            AppError::Sms(SmsError::InvalidMessage(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Sms(err) => {
                tracing::error!(error = %err, "SMS delivery error");
                (
                    StatusCode::BAD_GATEWAY,
                    "CHANNEL_ERROR",
                    "Unable to send SMS".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::VerificationFailed(msg) => {
                let body = json!({
                    "success": false,
                    "error": msg,
                    "code": "VERIFICATION_FAILED",
                });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }
            AppError::NotConfigured(what) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_CONFIGURED",
                format!("{what} is not configured"),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
