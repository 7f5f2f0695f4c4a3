//! Designation (job title) entity model and DTOs.

use roster_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A designation row from the `designations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Designation {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new designation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDesignation {
    pub name: String,
}

/// DTO for renaming a designation. The key never changes.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDesignation {
    pub name: String,
}

/// Designation as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignationDto {
    pub id: DbId,
    pub name: String,
}
