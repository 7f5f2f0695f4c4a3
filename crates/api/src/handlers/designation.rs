//! Handlers for the `/designations` resource. Same access rules as departments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roster_core::error::CoreError;
use roster_core::lookup::validate_lookup_name;
use roster_core::types::DbId;
use roster_db::mapping::to_dtos;
use roster_db::models::designation::{CreateDesignation, DesignationDto, UpdateDesignation};
use roster_db::models::employee::EmployeeDto;
use roster_db::repositories::Repository;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Designation",
        id,
    })
}

/// GET /api/v1/designations
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DesignationDto>>> {
    let designations = state.designation_repo().get_all().await?;
    Ok(Json(to_dtos(designations)))
}

/// GET /api/v1/designations/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DesignationDto>> {
    let designation = state
        .designation_repo()
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(designation.into()))
}

/// GET /api/v1/designations/{id}/employees
///
/// 404 if the designation itself does not exist; an empty list otherwise.
pub async fn list_employees(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<EmployeeDto>>> {
    state
        .designation_repo()
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let employees = state.employee_repo().list_by_designation(id).await?;
    Ok(Json(to_dtos(employees)))
}

/// POST /api/v1/designations
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateDesignation>,
) -> AppResult<(StatusCode, Json<DesignationDto>)> {
    validate_lookup_name("Designation", &input.name)?;
    let designation = state.designation_repo().add(&input).await?;
    Ok((StatusCode::CREATED, Json(designation.into())))
}

/// PUT /api/v1/designations/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDesignation>,
) -> AppResult<Json<DesignationDto>> {
    validate_lookup_name("Designation", &input.name)?;
    let designation = state
        .designation_repo()
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(designation.into()))
}

/// DELETE /api/v1/designations/{id}
///
/// 409 `FOREIGN_KEY_VIOLATION` while employees still hold the designation.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state
        .designation_repo()
        .delete(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(StatusCode::NO_CONTENT)
}
