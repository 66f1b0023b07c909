//! Eventspout bridge composition root.
//!
//! Receives identity host events over HTTP, dispatches each through the
//! admission filter and normalizer, and forwards admitted documents to
//! the configured webhook endpoint.

#![forbid(unsafe_code)]

mod bridge_config;
mod handlers;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use eventspout_application::{DispatchService, EnrichmentOptions, UserDirectory};
use eventspout_core::AppError;
use eventspout_domain::EventFilter;
use eventspout_infrastructure::{HttpNotificationSink, HttpUserDirectory, NullUserDirectory};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::bridge_config::{BridgeConfig, init_tracing};
use crate::state::BridgeState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = BridgeConfig::load()?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    let sink = Arc::new(HttpNotificationSink::new(
        http_client.clone(),
        config.webhook_base_url.clone(),
        config.webhook_api_key.clone(),
    ));

    let directory: Arc<dyn UserDirectory> = match &config.directory_base_url {
        Some(directory_base_url) => Arc::new(HttpUserDirectory::new(
            http_client,
            directory_base_url.clone(),
            config.directory_api_key.clone(),
        )),
        None => Arc::new(NullUserDirectory::new()),
    };

    let dispatch_service = DispatchService::new(
        directory,
        sink,
        EventFilter::from_csv(config.allowed_events.as_deref()),
        EnrichmentOptions {
            include_groups: config.include_groups,
            include_attributes: config.include_attributes,
        },
    );

    let app = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/events", post(handlers::ingest_event_handler))
        .route(
            "/admin-events",
            post(handlers::ingest_admin_event_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(BridgeState { dispatch_service });

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        %address,
        webhook_configured = config.webhook_base_url.is_some(),
        enrichment_configured = config.directory_base_url.is_some(),
        "eventspout-bridge listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("bridge server error: {error}")))
}
