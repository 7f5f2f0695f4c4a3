//! Well-known role name constants.
//!
//! The roles table is populated from [`SEEDED_ROLES`] at startup. Admins may
//! add further roles at runtime; only `admin` carries extra privileges.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Role assigned to self-registered accounts.
pub const DEFAULT_ROLE: &str = ROLE_USER;

/// Every role that must exist before the API accepts requests.
pub const SEEDED_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];

pub const MAX_ROLE_NAME_LEN: usize = 32;

/// Role names are 1-32 characters of lowercase ASCII letters, digits, `_`
/// and `-`, starting with a letter.
pub fn validate_role_name(name: &str) -> Result<(), CoreError> {
    let len = name.chars().count();
    if len == 0 || len > MAX_ROLE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Role name must be between 1 and {MAX_ROLE_NAME_LEN} characters"
        )));
    }
    let starts_with_letter = name.starts_with(|c: char| c.is_ascii_lowercase());
    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-');
    if !starts_with_letter || !name.chars().all(allowed) {
        return Err(CoreError::Validation(
            "Role name must start with a lowercase letter and contain only a-z, 0-9, '_' and '-'"
                .into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn seeded_roles_are_valid_names() {
        for name in SEEDED_ROLES {
            assert!(validate_role_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn role_name_rules() {
        assert!(validate_role_name("auditor").is_ok());
        assert!(validate_role_name("hr-lead_2").is_ok());
        assert_matches!(validate_role_name(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_role_name("Auditor"), Err(CoreError::Validation(_)));
        assert_matches!(validate_role_name("2nd"), Err(CoreError::Validation(_)));
        assert_matches!(validate_role_name("hr lead"), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_role_name(&"r".repeat(MAX_ROLE_NAME_LEN + 1)),
            Err(CoreError::Validation(_))
        );
    }
}
