use axum::routing::get;
use axum::Router;

use crate::handlers::package;
use crate::state::AppState;

/// Routes mounted at `/packages`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(package::list_packages))
        .route("/{id}", get(package::get_package))
}
