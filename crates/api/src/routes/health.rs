//! Liveness endpoint mounted at the root, outside `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthResponse {
    /// The service answers even when Postgres is down; `status` then reads
    /// `"degraded"`.
    fn from_db_check(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let reachable = libris_db::health_check(&state.pool).await.is_ok();
    if !reachable {
        tracing::warn!("Health check could not reach the database");
    }
    Json(HealthResponse::from_db_check(reachable))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
