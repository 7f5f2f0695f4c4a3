pub mod auth;
pub mod department;
pub mod designation;
pub mod employee;
pub mod health;
pub mod lookup;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/me                               current user (requires auth)
///
/// /employees                             list, create
/// /employees/{id}                        get, update, delete
///
/// /departments                           list, create (admin)
/// /departments/{id}                      get, update (admin), delete (admin)
/// /departments/{id}/employees            employees of a department
///
/// /designations                          list, create (admin)
/// /designations/{id}                     get, update (admin), delete (admin)
/// /designations/{id}/employees           employees holding a designation
///
/// /lookup/departments                    id/name list
/// /lookup/designations                   id/name list
/// ```
///
/// Everything outside `/auth/register` and `/auth/login` requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/employees", employee::router())
        .nest("/departments", department::router())
        .nest("/designations", designation::router())
        .nest("/lookup", lookup::router())
}
