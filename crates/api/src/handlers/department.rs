//! Handlers for the `/departments` resource.
//!
//! Reads are open to any authenticated user; writes require `admin`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roster_core::error::CoreError;
use roster_core::lookup::validate_lookup_name;
use roster_core::types::DbId;
use roster_db::mapping::to_dtos;
use roster_db::models::department::{CreateDepartment, DepartmentDto, UpdateDepartment};
use roster_db::models::employee::EmployeeDto;
use roster_db::repositories::Repository;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Department",
        id,
    })
}

/// GET /api/v1/departments
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DepartmentDto>>> {
    let departments = state.department_repo().get_all().await?;
    Ok(Json(to_dtos(departments)))
}

/// GET /api/v1/departments/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DepartmentDto>> {
    let department = state
        .department_repo()
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(department.into()))
}

/// GET /api/v1/departments/{id}/employees
pub async fn list_employees(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<EmployeeDto>>> {
    state
        .department_repo()
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let employees = state.employee_repo().list_by_department(id).await?;
    Ok(Json(to_dtos(employees)))
}

/// POST /api/v1/departments
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<DepartmentDto>)> {
    validate_lookup_name("Department", &input.name)?;
    let department = state.department_repo().add(&input).await?;
    Ok((StatusCode::CREATED, Json(department.into())))
}

/// PUT /api/v1/departments/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<DepartmentDto>> {
    validate_lookup_name("Department", &input.name)?;
    let department = state
        .department_repo()
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(department.into()))
}

/// DELETE /api/v1/departments/{id}
///
/// 409 `FOREIGN_KEY_VIOLATION` while employees still belong to the department.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state
        .department_repo()
        .delete(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(StatusCode::NO_CONTENT)
}
