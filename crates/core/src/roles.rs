//! Well-known role name constants.
//!
//! These must match the values accepted by `POST /register` and stored in
//! the `users.role` column / document field.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Role assigned when a registration omits one.
pub const DEFAULT_ROLE: &str = ROLE_USER;

const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];

/// Resolve the role requested at registration.
///
/// `None` and the empty string fall back to [`DEFAULT_ROLE`]; anything else
/// must be one of the known roles.
pub fn resolve_role(requested: Option<&str>) -> Result<&'static str, CoreError> {
    match requested.map(str::trim) {
        None | Some("") => Ok(DEFAULT_ROLE),
        Some(role) => VALID_ROLES
            .iter()
            .copied()
            .find(|known| *known == role)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid role '{role}'. Must be one of: {VALID_ROLES:?}"
                ))
            }),
    }
}
