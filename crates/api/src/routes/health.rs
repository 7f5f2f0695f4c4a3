//! Liveness endpoint for load balancers and the deployment smoke test.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when Postgres does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Which employee read path is active (`inline` or `stored_procedure`).
    pub read_strategy: &'static str,
}

/// GET /health
///
/// Always 200. A database outage shows up in `status` and `db_healthy`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = roster_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check could not reach the database");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        read_strategy: state.config.read_strategy.as_str(),
    })
}

/// `/health` sits beside `/api/v1`, outside authentication.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
