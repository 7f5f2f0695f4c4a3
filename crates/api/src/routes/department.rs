//! Route definitions for the `/departments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::department;
use crate::state::AppState;

/// Routes mounted at `/departments`.
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
        .route("/", get(department::list).post(department::create))
        .route(
            "/{id}",
            get(department::get_by_id)
                .put(department::update)
                .delete(department::delete),
        )
        .route("/{id}/employees", get(department::list_employees))
}
