use axum::routing::{get, post};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Resource and blog routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resources", get(content::list_resources))
        .route("/resources/{id}", get(content::get_resource))
        .route("/resources/{id}/download", post(content::download_resource))
        .route(
            "/blog-posts",
            get(content::list_blog_posts).post(content::create_blog_post),
        )
        .route(
            "/blog-posts/{id}",
            get(content::get_blog_post)
                .put(content::update_blog_post)
                .delete(content::delete_blog_post),
        )
}
