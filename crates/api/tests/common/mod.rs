#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ascend_api::config::ServerConfig;
use ascend_api::router::build_app_router;
use ascend_api::state::AppState;
use ascend_core::signature::compute_payment_signature;
use ascend_db::DynStore;
use ascend_events::{
    DispatcherConfig, EmailChannel, EmailError, NotificationDispatcher, OutboundEmail,
    SmsChannel, SmsError, SmsReceipt,
};
use ascend_gateway::{
    CheckoutOrder, GatewayError, OrderRequest, PaymentGateway, Prefill, Theme,
};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_KEY_SECRET: &str = "test_key_secret";
pub const ADMIN_EMAIL: &str = "admin@ascendcoaching.in";

// ---------------------------------------------------------------------------
// Gateway double
// ---------------------------------------------------------------------------

/// Records every order request and signs with [`TEST_KEY_SECRET`].
#[derive(Default)]
pub struct RecordingGateway {
    pub requests: Mutex<Vec<OrderRequest>>,
    pub fail: AtomicBool,
    fixed_order_id: Mutex<Option<String>>,
    counter: AtomicUsize,
}

impl RecordingGateway {
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn fail_orders(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Hand out the same order id on every call.
    pub fn always_return_order(&self, order_id: &str) {
        *self.fixed_order_id.lock().unwrap() = Some(order_id.to_string());
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn create_order(&self, request: &OrderRequest) -> Result<CheckoutOrder, GatewayError> {
        request.validate()?;
        self.requests.lock().unwrap().push(request.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(GatewayError::Api {
                status: 500,
                body: "gateway down".into(),
            });
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let order_id = self
            .fixed_order_id
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| format!("order_test_{n}"));
        Ok(CheckoutOrder {
            order_id,
            amount: request.amount * 100,
            currency: "INR".into(),
            key: "rzp_test_key".into(),
            name: "Ascend Career Coaching".into(),
            description: request.package_name.clone(),
            prefill: Prefill {
                name: request.customer_name.clone(),
                email: request.customer_email.clone(),
                contact: None,
            },
            theme: Theme {
                color: "#1e3a8a".into(),
            },
        })
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        compute_payment_signature(TEST_KEY_SECRET, order_id, payment_id) == signature
    }
}

pub fn sign(order_id: &str, payment_id: &str) -> String {
    compute_payment_signature(TEST_KEY_SECRET, order_id, payment_id)
}

// ---------------------------------------------------------------------------
// Channel doubles
// ---------------------------------------------------------------------------

/// Email channel that always fails.
#[derive(Default)]
pub struct FailingEmail {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl EmailChannel for FailingEmail {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn send(&self, _email: &OutboundEmail) -> Result<(), EmailError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(EmailError::Build("provider unavailable".into()))
    }
}

/// SMS channel that accepts everything except numbers containing `000000`.
#[derive(Default)]
pub struct RecordingSms {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SmsChannel for RecordingSms {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, SmsError> {
        let e164 = ascend_core::phone::to_e164(to)
            .ok_or_else(|| SmsError::InvalidNumber(to.to_string()))?;
        if e164.contains("000000") {
            return Err(SmsError::Api {
                status: 400,
                body: "unreachable handset".into(),
            });
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((e164.clone(), body.to_string()));
        Ok(SmsReceipt {
            sid: format!("SM{}", sent.len()),
            status: "queued".into(),
            to: e164,
        })
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: DynStore,
    pub gateway: Arc<RecordingGateway>,
    pub email: Arc<FailingEmail>,
    pub sms: Arc<RecordingSms>,
}

/// Seeded store, recording gateway, failing email, and recording SMS.
///
/// Admin SMS forwarding is off so SMS assertions only see direct sends.
pub async fn build_test_app() -> TestApp {
    build_app(true).await
}

/// Same as [`build_test_app`] but without an SMS channel.
pub async fn build_test_app_without_sms() -> TestApp {
    build_app(false).await
}

async fn build_app(with_sms: bool) -> TestApp {
    let store = ascend_db::create_seeded_store().await.unwrap();
    let gateway = Arc::new(RecordingGateway::default());
    let email = Arc::new(FailingEmail::default());
    let sms = Arc::new(RecordingSms::default());

    let dispatcher = NotificationDispatcher::new(
        store.clone(),
        DispatcherConfig {
            admin_email: ADMIN_EMAIL.into(),
            admin_phone: None,
        },
    )
    .with_email(email.clone());

    let sms_channel: Option<Arc<dyn SmsChannel>> = if with_sms {
        Some(sms.clone() as Arc<dyn SmsChannel>)
    } else {
        None
    };

    let config = test_config();
    let state = AppState::new(
        store.clone(),
        gateway.clone(),
        Arc::new(dispatcher),
        sms_channel,
        config.clone(),
    );

    TestApp {
        router: build_app_router(state, &config),
        store,
        gateway,
        email,
        sms,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: &TestApp, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn put_json(app: &TestApp, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &TestApp, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The Asha Rao investment booking.
pub fn investment_booking() -> serde_json::Value {
    serde_json::json!({
        "fullName": "Asha Rao",
        "mobile": "9876543210",
        "currentStage": "earlycareer",
        "packageId": "ascend-professional",
        "packageName": "Ascend",
        "bookingType": "investment",
        "amount": 6499,
    })
}

pub fn discovery_booking() -> serde_json::Value {
    serde_json::json!({
        "fullName": "Ravi Kumar",
        "mobile": "91234 56789",
        "email": "ravi@example.com",
        "currentStage": "student",
        "packageId": "launchpad-student",
        "packageName": "Launchpad",
        "bookingType": "discovery_call",
    })
}
