//! Handlers for the `/packages` catalogue.

use ascend_core::error::CoreError;
use ascend_db::models::package::Package;
use ascend_db::PackageStore;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/packages
pub async fn list_packages(State(state): State<AppState>) -> AppResult<Json<Vec<Package>>> {
    Ok(Json(state.store.list_packages().await?))
}

/// GET /api/packages/{id}
pub async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Package>> {
    let package = state
        .store
        .find_package(&id)
        .await?
        .ok_or_else(|| CoreError::not_found("Package", id))?;
    Ok(Json(package))
}
