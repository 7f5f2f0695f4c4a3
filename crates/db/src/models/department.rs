//! Department entity model and DTOs.

use roster_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A department row from the `departments` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new department.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
}

/// DTO for renaming a department.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDepartment {
    pub name: String,
}

/// Department as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDto {
    pub id: DbId,
    pub name: String,
}
