//! Joined-row materialization for the employee read path.
//!
//! One query returns a flattened row per employee: employee columns, then
//! department columns, then designation columns. Every projected column is
//! aliased as `"<entity>.<field>"` and decoded by that exact name, so the
//! column order of a query or stored function is irrelevant. A missing column
//! fails the first row with [`sqlx::Error::ColumnNotFound`]; a nested object
//! whose key disagrees with the employee's foreign key fails with
//! [`sqlx::Error::Decode`] wrapping a [`JoinMismatch`].

use roster_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::config::ReadStrategy;
use crate::models::department::Department;
use crate::models::designation::Designation;
use crate::models::employee::{Employee, EmployeeDetail};

pub const EMPLOYEE_PREFIX: &str = "employee";
pub const DEPARTMENT_PREFIX: &str = "department";
pub const DESIGNATION_PREFIX: &str = "designation";

/// Projection shared by the inline query. The stored functions in
/// `db/migrations` return exactly these column names.
pub const EMPLOYEE_DETAIL_PROJECTION: &str = r#"
    e.id             AS "employee.id",
    e.name           AS "employee.name",
    e.email          AS "employee.email",
    e.phone          AS "employee.phone",
    e.salary         AS "employee.salary",
    e.department_id  AS "employee.department_id",
    e.designation_id AS "employee.designation_id",
    e.created_at     AS "employee.created_at",
    e.updated_at     AS "employee.updated_at",
    d.id             AS "department.id",
    d.name           AS "department.name",
    d.created_at     AS "department.created_at",
    d.updated_at     AS "department.updated_at",
    g.id             AS "designation.id",
    g.name           AS "designation.name",
    g.created_at     AS "designation.created_at",
    g.updated_at     AS "designation.updated_at""#;

const EMPLOYEE_DETAIL_JOINS: &str = "FROM employees e
     JOIN departments d ON d.id = e.department_id
     JOIN designations g ON g.id = e.designation_id";

const INLINE_ORDER: &str = "ORDER BY e.name, e.id";
const PROCEDURE_ORDER: &str = r#"ORDER BY "employee.name", "employee.id""#;

/// Which employees a detail query selects. Every variant except `All` binds
/// one UUID parameter as `$1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFilter {
    All,
    ById,
    ByDepartment,
    ByDesignation,
}

/// Build the single-round-trip detail query for a strategy and filter.
pub fn detail_query(strategy: ReadStrategy, filter: DetailFilter) -> String {
    match strategy {
        ReadStrategy::Inline => {
            let clause = match filter {
                DetailFilter::All => "",
                DetailFilter::ById => "WHERE e.id = $1",
                DetailFilter::ByDepartment => "WHERE e.department_id = $1",
                DetailFilter::ByDesignation => "WHERE e.designation_id = $1",
            };
            format!(
                "SELECT {EMPLOYEE_DETAIL_PROJECTION}\n     {EMPLOYEE_DETAIL_JOINS}\n     {clause} {INLINE_ORDER}"
            )
        }
        ReadStrategy::StoredProcedure => match filter {
            DetailFilter::All => {
                format!("SELECT * FROM proc_get_all_employees() {PROCEDURE_ORDER}")
            }
            DetailFilter::ById => "SELECT * FROM proc_get_employee_by_id($1)".to_string(),
            DetailFilter::ByDepartment => format!(
                r#"SELECT * FROM proc_get_all_employees() WHERE "employee.department_id" = $1 {PROCEDURE_ORDER}"#
            ),
            DetailFilter::ByDesignation => format!(
                r#"SELECT * FROM proc_get_all_employees() WHERE "employee.designation_id" = $1 {PROCEDURE_ORDER}"#
            ),
        },
    }
}

/// Decode an entity from the columns of a joined row that carry `prefix`.
pub trait FromPrefixedRow: Sized {
    fn from_prefixed_row(row: &PgRow, prefix: &str) -> Result<Self, sqlx::Error>;
}

fn column(prefix: &str, field: &str) -> String {
    format!("{prefix}.{field}")
}

impl FromPrefixedRow for Employee {
    fn from_prefixed_row(row: &PgRow, prefix: &str) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(column(prefix, "id").as_str())?,
            name: row.try_get(column(prefix, "name").as_str())?,
            email: row.try_get(column(prefix, "email").as_str())?,
            phone: row.try_get(column(prefix, "phone").as_str())?,
            salary: row.try_get(column(prefix, "salary").as_str())?,
            department_id: row.try_get(column(prefix, "department_id").as_str())?,
            designation_id: row.try_get(column(prefix, "designation_id").as_str())?,
            created_at: row.try_get(column(prefix, "created_at").as_str())?,
            updated_at: row.try_get(column(prefix, "updated_at").as_str())?,
        })
    }
}

impl FromPrefixedRow for Department {
    fn from_prefixed_row(row: &PgRow, prefix: &str) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(column(prefix, "id").as_str())?,
            name: row.try_get(column(prefix, "name").as_str())?,
            created_at: row.try_get(column(prefix, "created_at").as_str())?,
            updated_at: row.try_get(column(prefix, "updated_at").as_str())?,
        })
    }
}

impl FromPrefixedRow for Designation {
    fn from_prefixed_row(row: &PgRow, prefix: &str) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(column(prefix, "id").as_str())?,
            name: row.try_get(column(prefix, "name").as_str())?,
            created_at: row.try_get(column(prefix, "created_at").as_str())?,
            updated_at: row.try_get(column(prefix, "updated_at").as_str())?,
        })
    }
}

/// A nested object that does not belong to the employee it was stitched onto.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("employee {employee_id}: {relation} column holds {found}, foreign key expects {expected}")]
pub struct JoinMismatch {
    pub employee_id: DbId,
    pub relation: &'static str,
    pub expected: DbId,
    pub found: DbId,
}

impl EmployeeDetail {
    /// Attach the department and designation to an employee, refusing any
    /// pairing that contradicts the employee's foreign keys.
    pub fn stitch(
        employee: Employee,
        department: Department,
        designation: Designation,
    ) -> Result<Self, JoinMismatch> {
        if department.id != employee.department_id {
            return Err(JoinMismatch {
                employee_id: employee.id,
                relation: DEPARTMENT_PREFIX,
                expected: employee.department_id,
                found: department.id,
            });
        }
        if designation.id != employee.designation_id {
            return Err(JoinMismatch {
                employee_id: employee.id,
                relation: DESIGNATION_PREFIX,
                expected: employee.designation_id,
                found: designation.id,
            });
        }
        Ok(Self {
            employee,
            department,
            designation,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for EmployeeDetail {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let employee = Employee::from_prefixed_row(row, EMPLOYEE_PREFIX)?;
        let department = Department::from_prefixed_row(row, DEPARTMENT_PREFIX)?;
        let designation = Designation::from_prefixed_row(row, DESIGNATION_PREFIX)?;
        Self::stitch(employee, department, designation)
            .map_err(|mismatch| sqlx::Error::Decode(Box::new(mismatch)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;

    fn fixture() -> (Employee, Department, Designation) {
        let now = Utc::now();
        let department = Department {
            id: Uuid::now_v7(),
            name: "Engineering".into(),
            created_at: now,
            updated_at: now,
        };
        let designation = Designation {
            id: Uuid::now_v7(),
            name: "Engineer".into(),
            created_at: now,
            updated_at: now,
        };
        let employee = Employee {
            id: Uuid::now_v7(),
            name: "Ann".into(),
            email: "a@x.com".into(),
            phone: None,
            salary: Decimal::from(50_000),
            department_id: department.id,
            designation_id: designation.id,
            created_at: now,
            updated_at: now,
        };
        (employee, department, designation)
    }

    #[test]
    fn stitch_attaches_matching_relations() {
        let (employee, department, designation) = fixture();
        let detail =
            EmployeeDetail::stitch(employee.clone(), department.clone(), designation.clone())
                .unwrap();
        assert_eq!(detail.employee, employee);
        assert_eq!(detail.department.id, employee.department_id);
        assert_eq!(detail.designation.id, employee.designation_id);
    }

    #[test]
    fn stitch_rejects_foreign_department() {
        let (employee, mut department, designation) = fixture();
        department.id = Uuid::now_v7();
        let err = EmployeeDetail::stitch(employee.clone(), department.clone(), designation)
            .unwrap_err();
        assert_eq!(err.relation, "department");
        assert_eq!(err.expected, employee.department_id);
        assert_eq!(err.found, department.id);
    }

    #[test]
    fn stitch_rejects_foreign_designation() {
        let (employee, department, mut designation) = fixture();
        designation.id = Uuid::now_v7();
        let err = EmployeeDetail::stitch(employee, department, designation).unwrap_err();
        assert_eq!(err.relation, "designation");
    }

    #[test]
    fn inline_queries_filter_by_key() {
        let by_id = detail_query(ReadStrategy::Inline, DetailFilter::ById);
        assert!(by_id.contains("WHERE e.id = $1"));
        assert!(by_id.contains(r#"AS "department.name""#));

        let all = detail_query(ReadStrategy::Inline, DetailFilter::All);
        assert!(!all.contains("WHERE"));
        assert!(!all.contains("$1"));

        let by_dept = detail_query(ReadStrategy::Inline, DetailFilter::ByDepartment);
        assert!(by_dept.contains("WHERE e.department_id = $1"));
    }

    #[test]
    fn procedure_queries_call_functions() {
        assert_eq!(
            detail_query(ReadStrategy::StoredProcedure, DetailFilter::ById),
            "SELECT * FROM proc_get_employee_by_id($1)"
        );
        let all = detail_query(ReadStrategy::StoredProcedure, DetailFilter::All);
        assert!(all.starts_with("SELECT * FROM proc_get_all_employees()"));
        let by_desig = detail_query(ReadStrategy::StoredProcedure, DetailFilter::ByDesignation);
        assert!(by_desig.contains(r#""employee.designation_id" = $1"#));
    }

    #[test]
    fn projection_covers_every_prefixed_field() {
        for field in [
            "employee.id",
            "employee.salary",
            "employee.department_id",
            "employee.designation_id",
            "department.id",
            "department.name",
            "designation.id",
            "designation.name",
        ] {
            assert!(
                EMPLOYEE_DETAIL_PROJECTION.contains(&format!("\"{field}\"")),
                "projection is missing {field}"
            );
        }
    }
}
