use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use eventspout_application::DispatchOutcome;
use eventspout_domain::{AdminEvent, LifecycleEvent};
use serde::Serialize;

use crate::state::BridgeState;

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Ingest acknowledgement payload.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub outcome: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Accepts one lifecycle event from the host.
///
/// Always answers `202 Accepted`: delivery failures are logged by the
/// dispatcher and acknowledged here, never surfaced back to the host.
pub async fn ingest_event_handler(
    State(state): State<BridgeState>,
    Json(event): Json<LifecycleEvent>,
) -> (StatusCode, Json<IngestResponse>) {
    let outcome = state.dispatch_service.handle_event(&event).await;
    (
        StatusCode::ACCEPTED,
        Json(IngestResponse {
            outcome: outcome_label(outcome),
        }),
    )
}

/// Accepts one admin event from the host.
pub async fn ingest_admin_event_handler(
    State(state): State<BridgeState>,
    Json(event): Json<AdminEvent>,
) -> (StatusCode, Json<IngestResponse>) {
    let outcome = state.dispatch_service.handle_admin_event(&event).await;
    (
        StatusCode::ACCEPTED,
        Json(IngestResponse {
            outcome: outcome_label(outcome),
        }),
    )
}

fn outcome_label(outcome: DispatchOutcome) -> &'static str {
    match outcome {
        DispatchOutcome::Published => "published",
        DispatchOutcome::Skipped => "skipped",
        DispatchOutcome::Dropped => "dropped",
    }
}
