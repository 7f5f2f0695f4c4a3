//! Conversions between persisted entities and transfer objects.
//!
//! Everything here is pure: no I/O, no clock reads, no key generation. Callers
//! pass in the key and timestamp for new entities.

use roster_core::employee::normalize_phone;
use roster_core::types::{DbId, Timestamp};

use crate::models::department::{Department, DepartmentDto};
use crate::models::designation::{Designation, DesignationDto};
use crate::models::employee::{
    CreateEmployee, Employee, EmployeeChanges, EmployeeDetail, EmployeeDto, UpdateEmployee,
};

impl From<EmployeeDetail> for EmployeeDto {
    fn from(detail: EmployeeDetail) -> Self {
        let EmployeeDetail {
            employee,
            department,
            designation,
        } = detail;
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            phone: employee.phone,
            salary: employee.salary,
            department_id: employee.department_id,
            department_name: department.name,
            designation_id: employee.designation_id,
            designation_name: designation.name,
        }
    }
}

impl From<Department> for DepartmentDto {
    fn from(department: Department) -> Self {
        Self {
            id: department.id,
            name: department.name,
        }
    }
}

impl From<Designation> for DesignationDto {
    fn from(designation: Designation) -> Self {
        Self {
            id: designation.id,
            name: designation.name,
        }
    }
}

/// Map a list of entities to their transfer objects.
pub fn to_dtos<E, D: From<E>>(entities: Vec<E>) -> Vec<D> {
    entities.into_iter().map(D::from).collect()
}

impl CreateEmployee {
    /// Build the entity to insert. Text fields are trimmed and a blank phone
    /// becomes `None`.
    pub fn to_entity(&self, id: DbId, now: Timestamp) -> Employee {
        Employee {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: normalize_phone(self.phone.as_deref()),
            salary: self.salary,
            department_id: self.department_id,
            designation_id: self.designation_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<&UpdateEmployee> for EmployeeChanges {
    fn from(input: &UpdateEmployee) -> Self {
        Self {
            name: input.name.as_deref().map(|n| n.trim().to_string()),
            email: input.email.as_deref().map(|e| e.trim().to_string()),
            phone: input
                .phone
                .as_deref()
                .map(|p| normalize_phone(Some(p))),
            salary: input.salary,
            department_id: input.department_id,
            designation_id: input.designation_id,
        }
    }
}

impl EmployeeChanges {
    /// Apply the present fields over an entity. The key and timestamps are
    /// never touched.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            employee.email.clone_from(email);
        }
        if let Some(phone) = &self.phone {
            employee.phone.clone_from(phone);
        }
        if let Some(salary) = self.salary {
            employee.salary = salary;
        }
        if let Some(department_id) = self.department_id {
            employee.department_id = department_id;
        }
        if let Some(designation_id) = self.designation_id {
            employee.designation_id = designation_id;
        }
    }
}
