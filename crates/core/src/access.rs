//! Ownership-based authorization.
//!
//! Every mutating operation on an alumni record, or on anything reachable
//! from one, goes through [`can_access`]: admins may act on anything, other
//! users only on records whose alumni they own.

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub role: String,
}

impl Actor {
    pub fn new(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// `true` if `actor` may act on a record owned by `owner_id`.
pub fn can_access(actor: &Actor, owner_id: DbId) -> bool {
    actor.is_admin() || actor.user_id == owner_id
}

/// Require access to a record whose owner may be unknown.
///
/// An unresolvable owner (`None`) only admits admins.
pub fn authorize(actor: &Actor, owner_id: Option<DbId>) -> Result<(), CoreError> {
    let allowed = match owner_id {
        Some(owner) => can_access(actor, owner),
        None => actor.is_admin(),
    };
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only an admin or the owning user may modify this record".into(),
        ))
    }
}
