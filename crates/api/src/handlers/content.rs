//! Handlers for resources and blog posts.

use ascend_core::error::CoreError;
use ascend_core::validation::FieldErrors;
use ascend_db::models::content::{BlogPost, NewBlogPost, Resource, UpdateBlogPost};
use ascend_db::ContentStore;
use ascend_events::NotificationEvent;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Lead-capture body for `POST /api/resources/{id}/download`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DownloadRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub success: bool,
    pub download_url: String,
    pub resource: Resource,
}

/// GET /api/resources
pub async fn list_resources(State(state): State<AppState>) -> AppResult<Json<Vec<Resource>>> {
    Ok(Json(state.store.list_resources().await?))
}

/// GET /api/resources/{id}
pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Resource>> {
    let resource = state
        .store
        .find_resource(&id)
        .await?
        .ok_or_else(|| CoreError::not_found("Resource", id))?;
    Ok(Json(resource))
}

/// POST /api/resources/{id}/download
///
/// Records the download and sends the link to the visitor.
pub async fn download_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<DownloadRequest>,
) -> AppResult<Json<DownloadResponse>> {
    let mut errors = FieldErrors::new();
    errors.require("name", &body.name);
    errors.email("email", &body.email);
    errors.into_result()?;

    let resource = state
        .store
        .record_resource_download(&id)
        .await?
        .ok_or_else(|| CoreError::not_found("Resource", id))?;

    tracing::info!(
        resource_id = %resource.id,
        downloads = resource.download_count,
        "Resource downloaded",
    );
    state
        .dispatcher
        .dispatch(&NotificationEvent::resource_download(
            &resource,
            &body.name,
            &body.email,
        ))
        .await;

    Ok(Json(DownloadResponse {
        success: true,
        download_url: resource.media_url.clone(),
        resource,
    }))
}

// ---------------------------------------------------------------------------
// Blog posts
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    /// When set, only posts with a matching `isPublished` flag are listed.
    pub published: Option<bool>,
}

/// GET /api/blog-posts
pub async fn list_blog_posts(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> AppResult<Json<Vec<BlogPost>>> {
    let mut posts = state.store.list_blog_posts().await?;
    if let Some(published) = query.published {
        posts.retain(|p| p.is_published == published);
    }
    Ok(Json(posts))
}

/// GET /api/blog-posts/{id}
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BlogPost>> {
    let post = state
        .store
        .find_blog_post(&id)
        .await?
        .ok_or_else(|| CoreError::not_found("BlogPost", id))?;
    Ok(Json(post))
}

/// POST /api/blog-posts
pub async fn create_blog_post(
    State(state): State<AppState>,
    Json(input): Json<NewBlogPost>,
) -> AppResult<(StatusCode, Json<BlogPost>)> {
    let mut errors = FieldErrors::new();
    errors.require("title", &input.title);
    errors.require("slug", &input.slug);
    errors.require("content", &input.content);
    errors.into_result()?;

    let post = state.store.create_blog_post(input).await?;
    tracing::info!(post_id = %post.id, slug = %post.slug, "Blog post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/blog-posts/{id}
pub async fn update_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<Json<BlogPost>> {
    let mut errors = FieldErrors::new();
    for (field, value) in [
        ("title", &input.title),
        ("slug", &input.slug),
        ("content", &input.content),
    ] {
        if let Some(value) = value {
            errors.require(field, value);
        }
    }
    errors.into_result()?;

    let post = state
        .store
        .update_blog_post(&id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("BlogPost", id))?;
    Ok(Json(post))
}

/// DELETE /api/blog-posts/{id}
pub async fn delete_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.store.delete_blog_post(&id).await? {
        return Err(CoreError::not_found("BlogPost", id).into());
    }
    tracing::info!(post_id = %id, "Blog post deleted");
    Ok(StatusCode::NO_CONTENT)
}
