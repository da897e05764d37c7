//! Downloadable resources and blog posts.

mod common;

use ascend_db::NotificationStore;
use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json, ADMIN_EMAIL};
use serde_json::json;

#[tokio::test]
async fn download_counts_and_notifies() {
    let app = build_test_app().await;
    let resources = body_json(get(&app, "/api/resources").await).await;
    let resources = resources.as_array().unwrap();
    assert_eq!(resources.len(), 3);
    let id = resources[0]["id"].as_str().unwrap();
    assert_eq!(resources[0]["downloadCount"], 0);

    let response = post_json(
        &app,
        &format!("/api/resources/{id}/download"),
        json!({ "name": "Kiran", "email": "kiran@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["downloadUrl"], "/downloads/resume-checklist.pdf");
    assert_eq!(json["resource"]["downloadCount"], 1);

    let resource = body_json(get(&app, &format!("/api/resources/{id}")).await).await;
    assert_eq!(resource["downloadCount"], 1);

    let notifications = app.store.list_notifications().await.unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(notifications
        .iter()
        .all(|n| n.notification_type.as_str() == "resource_download"));
    assert!(notifications.iter().any(|n| n.recipient == ADMIN_EMAIL));
}

#[tokio::test]
async fn download_requires_lead_details() {
    let app = build_test_app().await;
    let resources = body_json(get(&app, "/api/resources").await).await;
    let id = resources[0]["id"].as_str().unwrap();

    let response = post_json(
        &app,
        &format!("/api/resources/{id}/download"),
        json!({ "name": "", "email": "kiran" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let resource = body_json(get(&app, &format!("/api/resources/{id}")).await).await;
    assert_eq!(resource["downloadCount"], 0);
}

#[tokio::test]
async fn unknown_resource_is_404() {
    let app = build_test_app().await;
    let response = post_json(
        &app,
        "/api/resources/missing/download",
        json!({ "name": "Kiran", "email": "kiran@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blog_post_lifecycle() {
    let app = build_test_app().await;

    let response = post_json(
        &app,
        "/api/blog-posts",
        json!({
            "title": "Negotiating Your First Offer",
            "slug": "negotiating-first-offer",
            "excerpt": "Scripts that work.",
            "content": "Start with research.",
            "category": "Salary",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let post = body_json(response).await;
    let id = post["id"].as_str().unwrap().to_string();
    assert_eq!(post["isPublished"], false);

    let drafts = body_json(get(&app, "/api/blog-posts?published=false").await).await;
    assert_eq!(drafts.as_array().unwrap().len(), 1);
    let published = body_json(get(&app, "/api/blog-posts?published=true").await).await;
    assert_eq!(published.as_array().unwrap().len(), 1);
    assert_eq!(published[0]["slug"], "five-signs-career-change");
    let all = body_json(get(&app, "/api/blog-posts").await).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let uri = format!("/api/blog-posts/{id}");
    let response = put_json(&app, &uri, json!({ "isPublished": true })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["isPublished"], true);
    assert_eq!(updated["title"], "Negotiating Your First Offer");

    let response = put_json(&app, &uri, json!({ "title": "  " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = delete(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blog_post_requires_title_slug_and_content() {
    let app = build_test_app().await;
    let response = post_json(&app, "/api/blog-posts", json!({ "title": "Draft" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(message.contains("slug"), "got: {message}");
    assert!(message.contains("content"), "got: {message}");
}
