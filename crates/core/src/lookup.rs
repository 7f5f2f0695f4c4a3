//! Departments and designations: naming rules and default seed data.

use crate::error::CoreError;

/// Maximum length of a department or designation name.
pub const MAX_LOOKUP_NAME_LEN: usize = 100;

/// Departments inserted into an empty `departments` table at startup.
pub const DEFAULT_DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Human Resources (HR)",
    "Marketing",
    "Sales",
    "Finance",
];

/// Designations inserted into an empty `designations` table at startup.
pub const DEFAULT_DESIGNATIONS: &[&str] = &[
    "Software Engineer",
    "Project Manager",
    "HR Specialist",
    "Sales Representative",
    "Financial Analyst",
];

/// Validate a department or designation name. `kind` is used in the message.
pub fn validate_lookup_name(kind: &str, name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{kind} name must not be empty")));
    }
    if trimmed.chars().count() > MAX_LOOKUP_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{kind} name must be at most {MAX_LOOKUP_NAME_LEN} characters"
        )));
    }
    Ok(())
}
