//! Direct SMS utilities for the admin dashboard.

use std::sync::Arc;

use ascend_core::validation::FieldErrors;
use ascend_events::{SmsChannel, SmsError};
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Maximum recipients accepted by one bulk request.
const MAX_BULK_RECIPIENTS: usize = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendSmsRequest {
    pub to: String,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BulkSmsRequest {
    pub recipients: Vec<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendSmsResponse {
    pub success: bool,
    pub sid: String,
    pub status: String,
    pub to: String,
}

/// Per-recipient outcome in a bulk send.
#[derive(Debug, Serialize)]
pub struct BulkSmsResult {
    pub to: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkSmsResponse {
    pub success: bool,
    pub sent: usize,
    pub failed: usize,
    pub results: Vec<BulkSmsResult>,
}

fn channel(state: &AppState) -> AppResult<Arc<dyn SmsChannel>> {
    state
        .sms
        .clone()
        .ok_or(AppError::NotConfigured("SMS delivery"))
}

/// POST /api/send-sms
pub async fn send_sms(
    State(state): State<AppState>,
    Json(body): Json<SendSmsRequest>,
) -> AppResult<Json<SendSmsResponse>> {
    let mut errors = FieldErrors::new();
    errors.require("to", &body.to);
    errors.require("message", &body.message);
    errors.into_result()?;

    let receipt = channel(&state)?.send(&body.to, &body.message).await?;
    Ok(Json(SendSmsResponse {
        success: true,
        sid: receipt.sid,
        status: receipt.status,
        to: receipt.to,
    }))
}

/// POST /api/send-bulk-sms
///
/// Sends to every recipient concurrently. Individual failures are reported
/// per recipient; the request itself only fails on invalid input.
pub async fn send_bulk_sms(
    State(state): State<AppState>,
    Json(body): Json<BulkSmsRequest>,
) -> AppResult<Json<BulkSmsResponse>> {
    let mut errors = FieldErrors::new();
    if body.recipients.is_empty() {
        errors.add("recipients", "must not be empty");
    } else if body.recipients.len() > MAX_BULK_RECIPIENTS {
        errors.add(
            "recipients",
            format!("must contain at most {MAX_BULK_RECIPIENTS} numbers"),
        );
    }
    errors.require("message", &body.message);
    errors.into_result()?;

    let sms = channel(&state)?;
    let sends = body.recipients.iter().map(|to| {
        let sms = Arc::clone(&sms);
        let message = body.message.as_str();
        async move { (to.clone(), sms.send(to, message).await) }
    });
    let outcomes = futures::future::join_all(sends).await;

    let results: Vec<BulkSmsResult> = outcomes
        .into_iter()
        .map(|(to, outcome)| match outcome {
            Ok(receipt) => BulkSmsResult {
                to,
                success: true,
                sid: Some(receipt.sid),
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, to = %to, "Bulk SMS send failed");
                BulkSmsResult {
                    to,
                    success: false,
                    sid: None,
                    error: Some(public_error(&e)),
                }
            }
        })
        .collect();

    let sent = results.iter().filter(|r| r.success).count();
    let failed = results.len() - sent;
    tracing::info!(sent, failed, "Bulk SMS finished");

    Ok(Json(BulkSmsResponse {
        success: failed == 0,
        sent,
        failed,
        results,
    }))
}

/// Client-safe description of a per-recipient failure.
fn public_error(err: &SmsError) -> String {
    match err {
        SmsError::InvalidNumber(_) => "invalid phone number".into(),
        SmsError::InvalidMessage(msg) => msg.clone(),
        _ => "delivery failed".into(),
    }
}
