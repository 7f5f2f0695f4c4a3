//! Employee entity, its joined read shape, and DTOs.

use roster_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::department::Department;
use crate::models::designation::Designation;

/// An employee row from the `employees` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub salary: Decimal,
    pub department_id: DbId,
    pub designation_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An employee together with its resolved department and designation.
///
/// Every employee returned by a read is in this shape; the navigation objects
/// are always populated and always agree with the employee's foreign keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeDetail {
    pub employee: Employee,
    pub department: Department,
    pub designation: Designation,
}

/// DTO for creating a new employee.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub salary: Decimal,
    pub department_id: DbId,
    pub designation_id: DbId,
}

/// DTO for updating an existing employee. All fields are optional; only the
/// fields present are applied. A blank `phone` clears the stored phone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub salary: Option<Decimal>,
    pub department_id: Option<DbId>,
    pub designation_id: Option<DbId>,
}

/// Entity-shaped change set built from an [`UpdateEmployee`].
///
/// `phone` is doubly optional: `None` leaves it alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub salary: Option<Decimal>,
    pub department_id: Option<DbId>,
    pub designation_id: Option<DbId>,
}

/// Flat employee representation returned by the API, with the department and
/// designation names denormalized onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub salary: Decimal,
    pub department_id: DbId,
    pub department_name: String,
    pub designation_id: DbId,
    pub designation_name: String,
}
