use std::net::SocketAddr;
use std::sync::Arc;

use ascend_api::config::AppConfig;
use ascend_api::router::build_app_router;
use ascend_api::state::AppState;
use ascend_events::{EmailChannel, NotificationDispatcher, SmsChannel, TwilioSms};
use ascend_gateway::{PaymentGateway, RazorpayGateway, UnconfiguredGateway};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "ascend_api=debug,ascend_events=debug,ascend_gateway=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = AppConfig::from_env();
    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        gateway = config.razorpay.is_some(),
        email = config.email.is_some(),
        sms = config.sms.is_some(),
        "Loaded configuration",
    );

    // --- Store ---
    let store = ascend_db::create_seeded_store()
        .await
        .expect("Failed to seed store");
    tracing::info!("In-memory store seeded");

    // --- Payment gateway ---
    let gateway: Arc<dyn PaymentGateway> = match config.razorpay.clone() {
        Some(razorpay) => Arc::new(
            RazorpayGateway::new(razorpay).expect("Failed to build payment gateway client"),
        ),
        None => {
            tracing::warn!("Razorpay credentials missing; orders will be unavailable");
            Arc::new(UnconfiguredGateway)
        }
    };

    // --- Notification channels ---
    let sms: Option<Arc<dyn SmsChannel>> = match config.sms.clone() {
        Some(sms_config) => match TwilioSms::new(sms_config) {
            Ok(twilio) => Some(Arc::new(twilio)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build SMS client; SMS disabled");
                None
            }
        },
        None => None,
    };

    let mut dispatcher = NotificationDispatcher::new(store.clone(), config.dispatcher.clone());
    if let Some(email_config) = config.email.clone() {
        match email_config.into_channel() {
            Ok(channel) => {
                tracing::info!(provider = channel.name(), "Email delivery enabled");
                dispatcher = dispatcher.with_email(channel);
            }
            Err(e) => tracing::error!(error = %e, "Failed to build email channel; email disabled"),
        }
    }
    if let Some(channel) = &sms {
        dispatcher = dispatcher.with_sms(Arc::clone(channel));
    }

    // --- App state / router ---
    let state = AppState::new(
        store,
        gateway,
        Arc::new(dispatcher),
        sms,
        config.server.clone(),
    );
    let app = build_app_router(state, &config.server);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.server.host.parse().expect("Invalid HOST address"),
        config.server.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
