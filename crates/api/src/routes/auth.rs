//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register    -> register
/// POST /login       -> login
/// GET  /me          -> me (requires auth)
/// GET  /roles       -> roles (admin)
/// POST /add-role    -> add_role (admin)
/// POST /assign-role -> assign_role (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/roles", get(auth::roles))
        .route("/add-role", post(auth::add_role))
        .route("/assign-role", post(auth::assign_role))
}
