//! Handlers for the contact form.

use ascend_core::validation::FieldErrors;
use ascend_db::models::contact::{ContactSubmission, NewContactSubmission};
use ascend_db::ContactStore;
use ascend_events::NotificationEvent;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    pub submission: ContactSubmission,
}

/// POST /api/contact
///
/// Stores the inquiry, then notifies the admin and acknowledges the sender.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<NewContactSubmission>,
) -> AppResult<(StatusCode, Json<ContactResponse>)> {
    let mut errors = FieldErrors::new();
    errors.require("firstName", &input.first_name);
    errors.email("email", &input.email);
    errors.require("message", &input.message);
    errors.into_result()?;

    let input = NewContactSubmission {
        first_name: input.first_name.trim().to_string(),
        last_name: input.last_name.trim().to_string(),
        email: input.email.trim().to_string(),
        phone: input.phone.filter(|p| !p.trim().is_empty()),
        service_interest: input.service_interest.filter(|s| !s.trim().is_empty()),
        message: input.message.trim().to_string(),
    };

    let submission = state.store.create_contact(input).await?;
    tracing::info!(submission_id = %submission.id, "Contact submission received");

    state
        .dispatcher
        .dispatch(&NotificationEvent::contact(&submission))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            message: "Thank you for reaching out. We will get back to you shortly.",
            submission,
        }),
    ))
}

/// GET /api/contact
pub async fn list_contacts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ContactSubmission>>> {
    Ok(Json(state.store.list_contacts().await?))
}
