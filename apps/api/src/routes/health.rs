//! Health check HTTP route handlers
//!
//! Provides endpoints for checking the health of the API and its store:
//! - `GET /health` - Simple liveness check (returns 200 OK)
//! - `GET /health/live` - Kubernetes-style liveness probe
//! - `GET /health/ready` - Readiness check (pings the document store)

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use bookshelf_shared_config::Environment;

use crate::error::ApiResult;
use crate::repositories::StoreRegistry;

/// Shared application state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    /// Store whose reachability decides readiness
    pub registry: StoreRegistry,
    /// Environment reported by the liveness probe
    pub environment: Environment,
}

impl HealthState {
    pub fn new(registry: StoreRegistry, environment: Environment) -> Self {
        Self {
            registry,
            environment,
        }
    }
}

/// Create health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(simple_health))
        .route("/live", get(liveness_probe))
        .route("/ready", get(readiness_probe))
        .with_state(state)
}

/// Simple health check - always returns OK if the server is running
async fn simple_health() -> &'static str {
    "OK"
}

/// Liveness probe
///
/// Returns 200 if the server process is running and can handle requests.
/// Does not touch the store; that is what readiness is for.
async fn liveness_probe(State(state): State<HealthState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment,
    }))
}

/// Readiness probe
///
/// # Response
/// - 200 OK when the document store answers a ping
/// - 503 Service Unavailable when the store is unreachable
async fn readiness_probe(State(state): State<HealthState>) -> ApiResult<impl IntoResponse> {
    state.registry.ping().await?;

    Ok(Json(serde_json::json!({
        "status": "ready",
        "store": state.registry.backend(),
    })))
}
