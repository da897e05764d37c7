//! Tests for the Razorpay client against a local stub of the Orders API.

use std::sync::{Arc, Mutex};

use ascend_gateway::{GatewayError, OrderRequest, PaymentGateway, RazorpayConfig, RazorpayGateway};
use assert_matches::assert_matches;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Captured {
    body: Arc<Mutex<Option<serde_json::Value>>>,
    auth: Arc<Mutex<Option<String>>>,
}

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn gateway(api_url: String) -> RazorpayGateway {
    let mut config = RazorpayConfig::new("rzp_test_key", "rzp_test_secret");
    config.api_url = api_url;
    RazorpayGateway::new(config).unwrap()
}

fn request() -> OrderRequest {
    OrderRequest {
        amount: 6499,
        package_id: "ascend-professional".into(),
        customer_name: "Asha Rao".into(),
        customer_email: "asha@example.com".into(),
        package_name: "Ascend".into(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_order_sends_minor_units_and_returns_checkout() {
    let captured = Captured::default();
    let router = Router::new()
        .route(
            "/orders",
            post(
                |State(captured): State<Captured>,
                 headers: HeaderMap,
                 Json(body): Json<serde_json::Value>| async move {
                    *captured.auth.lock().unwrap() = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    let amount = body["amount"].clone();
                    *captured.body.lock().unwrap() = Some(body);
                    Json(serde_json::json!({
                        "id": "order_Q1w2e3",
                        "entity": "order",
                        "amount": amount,
                        "currency": "INR",
                        "status": "created",
                    }))
                },
            ),
        )
        .with_state(captured.clone());
    let url = spawn(router).await;

    let checkout = gateway(url).create_order(&request()).await.unwrap();

    assert_eq!(checkout.order_id, "order_Q1w2e3");
    assert_eq!(checkout.amount, 649_900);
    assert_eq!(checkout.currency, "INR");
    assert_eq!(checkout.key, "rzp_test_key");
    assert_eq!(checkout.description, "Ascend");
    assert_eq!(checkout.prefill.email, "asha@example.com");

    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["amount"], 649_900);
    assert_eq!(body["currency"], "INR");
    assert_eq!(body["notes"]["packageId"], "ascend-professional");
    assert_eq!(body["notes"]["customerEmail"], "asha@example.com");

    let auth = captured.auth.lock().unwrap().clone().unwrap();
    assert!(auth.starts_with("Basic "));
}

#[tokio::test]
async fn provider_error_status_is_api_error() {
    let router = Router::new().route(
        "/orders",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": {"description": "bad amount"}})),
            )
        }),
    );
    let url = spawn(router).await;

    assert_matches!(
        gateway(url).create_order(&request()).await,
        Err(GatewayError::Api { status: 400, body }) if body.contains("bad amount")
    );
}

#[tokio::test]
async fn malformed_success_body_is_unexpected_response() {
    let router = Router::new().route(
        "/orders",
        post(|| async { Json(serde_json::json!({"status": "created"})) }),
    );
    let url = spawn(router).await;

    assert_matches!(
        gateway(url).create_order(&request()).await,
        Err(GatewayError::UnexpectedResponse(_))
    );
}

#[tokio::test]
async fn unreachable_provider_is_request_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    assert_matches!(
        gateway(format!("http://{addr}")).create_order(&request()).await,
        Err(GatewayError::Request(_))
    );
}

#[tokio::test]
async fn invalid_request_never_reaches_the_provider() {
    let mut bad = request();
    bad.customer_name = "  ".into();

    // No server: a network attempt would surface as `Request`.
    assert_matches!(
        gateway("http://127.0.0.1:9".into()).create_order(&bad).await,
        Err(GatewayError::InvalidRequest(msg)) if msg.contains("customerName")
    );
}
