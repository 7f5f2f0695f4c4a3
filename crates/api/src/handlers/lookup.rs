//! Handlers for `/lookup`: the id/name lists clients use to fill dropdowns.

use axum::extract::State;
use axum::Json;
use roster_db::mapping::to_dtos;
use roster_db::models::department::DepartmentDto;
use roster_db::models::designation::DesignationDto;
use roster_db::repositories::Repository;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /api/v1/lookup/departments
pub async fn departments(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DepartmentDto>>> {
    let departments = state.department_repo().get_all().await?;
    Ok(Json(to_dtos(departments)))
}

/// GET /api/v1/lookup/designations
pub async fn designations(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DesignationDto>>> {
    let designations = state.designation_repo().get_all().await?;
    Ok(Json(to_dtos(designations)))
}
