//! Alumni field validation, shared by every backend.

use crate::error::CoreError;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate the required fields of a new alumni record.
pub fn validate_create(
    student_number: &str,
    name: &str,
    major: &str,
    email: &str,
) -> Result<(), CoreError> {
    if [student_number, name, major, email].into_iter().any(is_blank) {
        return Err(CoreError::Validation(
            "student_number, name, major and email are required".into(),
        ));
    }
    Ok(())
}

/// Validate the required fields of an alumni update.
pub fn validate_update(name: &str, major: &str, email: &str) -> Result<(), CoreError> {
    if [name, major, email].into_iter().any(is_blank) {
        return Err(CoreError::Validation(
            "name, major and email are required".into(),
        ));
    }
    Ok(())
}
