//! Handlers for the `/employees` resource.

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roster_core::employee::{validate_email, validate_name, validate_phone, validate_salary};
use roster_core::error::CoreError;
use roster_core::types::DbId;
use roster_db::mapping::to_dtos;
use roster_db::models::employee::{CreateEmployee, EmployeeDto, UpdateEmployee};
use roster_db::repositories::Repository;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Employee",
        id,
    })
}

fn validate_create(input: &CreateEmployee) -> Result<(), CoreError> {
    validate_name(&input.name)?;
    validate_email(&input.email)?;
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    validate_salary(&input.salary)
}

/// Only the fields present in the request are checked.
fn validate_update(input: &UpdateEmployee) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    if let Some(salary) = &input.salary {
        validate_salary(salary)?;
    }
    Ok(())
}

/// GET /api/v1/employees
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EmployeeDto>>> {
    let employees = state.employee_repo().get_all().await?;
    Ok(Json(to_dtos(employees)))
}

/// GET /api/v1/employees/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EmployeeDto>> {
    let employee = state
        .employee_repo()
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(employee.into()))
}

/// POST /api/v1/employees
///
/// Returns 201 with a `Location` header pointing at the new employee.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateEmployee>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;

    let employee = state.employee_repo().add(&input).await?;
    let dto = EmployeeDto::from(employee);

    tracing::debug!(employee_id = %dto.id, created_by = %user.user_id, "Employee created via API");
    let location = format!("/api/v1/employees/{}", dto.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(dto)))
}

/// PUT /api/v1/employees/{id}
pub async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEmployee>,
) -> AppResult<Json<EmployeeDto>> {
    validate_update(&input)?;

    let employee = state
        .employee_repo()
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(employee.into()))
}

/// DELETE /api/v1/employees/{id}
pub async fn delete(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state
        .employee_repo()
        .delete(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;

    fn input() -> CreateEmployee {
        CreateEmployee {
            name: "Ann".into(),
            email: "a@x.com".into(),
            phone: Some("+1 (555) 010-0100".into()),
            salary: Decimal::from(50_000),
            department_id: Uuid::now_v7(),
            designation_id: Uuid::now_v7(),
        }
    }

    #[test]
    fn valid_create_passes() {
        assert!(validate_create(&input()).is_ok());
    }

    #[test]
    fn create_rejects_bad_fields() {
        let mut bad = input();
        bad.email = "not-an-email".into();
        assert_matches!(validate_create(&bad), Err(CoreError::Validation(_)));

        let mut bad = input();
        bad.salary = Decimal::from(-1);
        assert_matches!(validate_create(&bad), Err(CoreError::Validation(_)));

        let mut bad = input();
        bad.name = "   ".into();
        assert_matches!(validate_create(&bad), Err(CoreError::Validation(_)));
    }

    #[test]
    fn update_checks_only_present_fields() {
        assert!(validate_update(&UpdateEmployee::default()).is_ok());
        assert!(validate_update(&UpdateEmployee {
            phone: Some(String::new()),
            ..Default::default()
        })
        .is_ok());
        assert_matches!(
            validate_update(&UpdateEmployee {
                phone: Some("call me".into()),
                ..Default::default()
            }),
            Err(CoreError::Validation(_))
        );
    }
}
