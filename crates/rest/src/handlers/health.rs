//! Health check endpoint handlers.
//!
//! Probes for load balancers and orchestrators. Neither requires a viewer
//! identity.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use docternal_persistence::core::ContentStore;
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe.
///
/// Reports the content store backend in use.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: ContentStore + 'static,
{
    debug!("Processing readiness check request");

    let response = serde_json::json!({
        "status": "ready",
        "backend": state.store().backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok((StatusCode::OK, Json(response)).into_response())
}
