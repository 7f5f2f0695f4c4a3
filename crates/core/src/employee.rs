//! Field rules for employee records.
//!
//! Handlers call these before touching the database so that malformed input
//! is rejected with a 400 instead of surfacing as a constraint violation.

use rust_decimal::Decimal;
use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length of an employee's full name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum length of a phone number, in characters.
pub const MAX_PHONE_LEN: usize = 32;

/// Salaries are stored as `NUMERIC(18, 2)`.
pub const SALARY_SCALE: u32 = 2;

/// Exclusive upper bound for a salary (16 integer digits).
const SALARY_LIMIT: i64 = 10_000_000_000_000_000;

/// A name must be non-blank and at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let trimmed = email.trim();
    if trimmed.len() > MAX_EMAIL_LEN {
        return Err(CoreError::Validation(format!(
            "Email must be at most {MAX_EMAIL_LEN} characters"
        )));
    }
    if !trimmed.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{trimmed}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Phone numbers may contain digits, spaces, and `+ - ( )`, and need at least one digit.
///
/// An empty string is accepted; callers treat it as "no phone" via [`normalize_phone`].
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    let trimmed = phone.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if trimmed.chars().count() > MAX_PHONE_LEN {
        return Err(CoreError::Validation(format!(
            "Phone must be at most {MAX_PHONE_LEN} characters"
        )));
    }
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')');
    if !trimmed.chars().all(allowed) || !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "'{trimmed}' is not a valid phone number"
        )));
    }
    Ok(())
}

/// Trim a phone number, mapping blank input to `None`.
pub fn normalize_phone(phone: Option<&str>) -> Option<String> {
    phone
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

/// Salaries must be non-negative, fit `NUMERIC(18, 2)`, and carry at most two decimals.
pub fn validate_salary(salary: &Decimal) -> Result<(), CoreError> {
    if salary.is_sign_negative() && !salary.is_zero() {
        return Err(CoreError::Validation("Salary must not be negative".into()));
    }
    if salary.normalize().scale() > SALARY_SCALE {
        return Err(CoreError::Validation(format!(
            "Salary must have at most {SALARY_SCALE} decimal places"
        )));
    }
    if *salary >= Decimal::from(SALARY_LIMIT) {
        return Err(CoreError::Validation("Salary is too large".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn name_rules() {
        assert!(validate_name("Ann").is_ok());
        assert_matches!(validate_name("   "), Err(CoreError::Validation(_)));
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
        assert_matches!(
            validate_name(&"x".repeat(MAX_NAME_LEN + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn email_rules() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("  ann.lee@example.org ").is_ok());
        assert_matches!(validate_email("not-an-email"), Err(CoreError::Validation(_)));
        assert_matches!(validate_email(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn phone_rules() {
        assert!(validate_phone("+1 (555) 010-9999").is_ok());
        assert!(validate_phone("").is_ok());
        assert_matches!(validate_phone("call me"), Err(CoreError::Validation(_)));
        assert_matches!(validate_phone("+-()"), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_phone(&"1".repeat(MAX_PHONE_LEN + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn blank_phone_normalizes_to_none() {
        assert_eq!(normalize_phone(None), None);
        assert_eq!(normalize_phone(Some("   ")), None);
        assert_eq!(normalize_phone(Some(" 555 ")), Some("555".to_string()));
    }

    #[test]
    fn salary_rules() {
        assert!(validate_salary(&dec("50000")).is_ok());
        assert!(validate_salary(&dec("0")).is_ok());
        assert!(validate_salary(&dec("1234.50")).is_ok());
        // Trailing zeros beyond the scale are fine once normalized.
        assert!(validate_salary(&dec("10.5000")).is_ok());
        assert_matches!(validate_salary(&dec("-1")), Err(CoreError::Validation(_)));
        assert_matches!(validate_salary(&dec("1.005")), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_salary(&dec("10000000000000000")),
            Err(CoreError::Validation(_))
        );
    }
}
