//! Admin notification inbox.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, discovery_booking, get, patch_json, post_json, ADMIN_EMAIL};
use serde_json::json;

#[tokio::test]
async fn admin_inbox_only_lists_admin_notifications() {
    let app = build_test_app().await;
    post_json(&app, "/api/bookings", discovery_booking()).await;

    let json = body_json(get(&app, "/api/notifications/admin").await).await;
    let inbox = json.as_array().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["recipient"], ADMIN_EMAIL);
    assert_eq!(inbox[0]["type"], "booking");
    assert_eq!(inbox[0]["isRead"], false);
    assert_eq!(inbox[0]["metadata"]["event"], "booking_created");
}

#[tokio::test]
async fn stats_count_every_notification() {
    let app = build_test_app().await;
    post_json(&app, "/api/bookings", discovery_booking()).await;
    post_json(
        &app,
        "/api/contact",
        json!({ "firstName": "Priya", "email": "priya@example.com", "message": "Hi" }),
    )
    .await;

    let stats = body_json(get(&app, "/api/notifications/stats").await).await;
    assert_eq!(stats["total"], 4);
    assert_eq!(stats["unread"], 4);
    assert_eq!(stats["byType"]["booking"], 2);
    assert_eq!(stats["byType"]["contact"], 2);
    assert_eq!(stats["byType"]["payment"], 0);
}

#[tokio::test]
async fn mark_read_is_idempotent() {
    let app = build_test_app().await;
    post_json(&app, "/api/bookings", discovery_booking()).await;

    let inbox = body_json(get(&app, "/api/notifications/admin").await).await;
    let id = inbox[0]["id"].as_str().unwrap();
    let uri = format!("/api/notifications/{id}/read");

    for _ in 0..2 {
        let response = patch_json(&app, &uri, json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["isRead"], true);
    }

    let stats = body_json(get(&app, "/api/notifications/stats").await).await;
    assert_eq!(stats["unread"], 1);
}

#[tokio::test]
async fn mark_read_unknown_id_is_404() {
    let app = build_test_app().await;
    let response = patch_json(&app, "/api/notifications/missing/read", json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
