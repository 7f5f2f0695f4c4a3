//! Route definitions for `/lookup`.

use axum::routing::get;
use axum::Router;

use crate::handlers::lookup;
use crate::state::AppState;

/// Routes mounted at `/lookup`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/departments", get(lookup::departments))
        .route("/designations", get(lookup::designations))
}
