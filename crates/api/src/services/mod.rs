//! Request-level operations shared by every storage backend.
//!
//! Services validate input, resolve ownership and apply
//! [`alumni_core::access::authorize`] before delegating to [`Stores`]. The
//! handlers stay thin, and the relational and document backends cannot
//! drift apart on access rules.
//!
//! [`Stores`]: alumni_db::Stores

pub mod accounts;
pub mod alumni;
pub mod employment;
pub mod files;

use alumni_core::error::CoreError;
use alumni_core::types::DbId;

use crate::error::AppError;

pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

#[cfg(test)]
pub(crate) mod test_support {
    use alumni_core::access::Actor;
    use alumni_core::roles::{ROLE_ADMIN, ROLE_USER};
    use alumni_db::models::alumni::{Alumni, NewAlumni};
    use alumni_db::models::user::CreateUser;
    use alumni_db::Stores;

    pub fn admin() -> Actor {
        Actor::new(1, ROLE_ADMIN)
    }

    pub fn user(id: i64) -> Actor {
        Actor::new(id, ROLE_USER)
    }

    pub async fn seed_user(stores: &Stores, username: &str, role: &str) -> i64 {
        stores
            .users
            .create_user(&CreateUser {
                username: username.into(),
                email: format!("{username}@example.com"),
                password_hash: "unused".into(),
                role: role.into(),
            })
            .await
            .unwrap()
            .id
    }

    pub async fn seed_alumni(stores: &Stores, owner: i64, name: &str) -> Alumni {
        stores
            .alumni
            .create_alumni(&NewAlumni {
                student_number: format!("NIM-{name}"),
                name: name.into(),
                major: "Informatics".into(),
                cohort_year: 2016,
                graduation_year: 2020,
                email: format!("{}@example.com", name.to_lowercase()),
                phone: String::new(),
                address: String::new(),
                user_id: owner,
            })
            .await
            .unwrap()
    }
}
