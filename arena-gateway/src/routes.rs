//! Axum route handlers for the Arena gateway API.

use std::sync::Arc;

use arena_auditor::{AuditMode, AuditReport, Auditor};
use arena_core::{AuditResult, LogInput};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::GatewayError;

// ── Shared state ─────────────────────────────────────────────────────────────

type SharedAuditor = Arc<Auditor>;

// ── Response types ───────────────────────────────────────────────────────────

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mode: AuditMode,
}

// ── Router ───────────────────────────────────────────────────────────────────

/// Build the application router around a shared auditor.
pub fn create_router(auditor: SharedAuditor) -> Router {
    Router::new()
        .route("/v1/audit", post(audit))
        .route("/v1/audit/report", post(audit_report))
        .route("/health", get(health))
        .with_state(auditor)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /health`: liveness probe reporting which engine is active.
pub async fn health(State(auditor): State<SharedAuditor>) -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok", mode: auditor.mode() }))
}

/// `POST /v1/audit`: audit a log and return the verdict.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] if the body is not a JSON
/// object with a string `log` field.
pub async fn audit(
    State(auditor): State<SharedAuditor>,
    body: Result<Json<LogInput>, JsonRejection>,
) -> Result<Json<AuditResult>, GatewayError> {
    let Json(input) = body?;
    Ok(Json(auditor.audit(&input).await.result))
}

/// `POST /v1/audit/report`: audit a log and return the verdict with its
/// route, log digest and timestamp.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] if the body is not a JSON
/// object with a string `log` field.
pub async fn audit_report(
    State(auditor): State<SharedAuditor>,
    body: Result<Json<LogInput>, JsonRejection>,
) -> Result<Json<AuditReport>, GatewayError> {
    let Json(input) = body?;
    Ok(Json(auditor.audit(&input).await))
}
