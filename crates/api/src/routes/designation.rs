//! Route definitions for the `/designations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::designation;
use crate::state::AppState;

/// Routes mounted at `/designations`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (admin)
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update (admin)
/// DELETE /{id}            -> delete (admin)
/// GET    /{id}/employees  -> list_employees
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(designation::list).post(designation::create))
        .route(
            "/{id}",
            get(designation::get_by_id)
                .put(designation::update)
                .delete(designation::delete),
        )
        .route("/{id}/employees", get(designation::list_employees))
}
