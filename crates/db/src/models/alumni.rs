//! Alumni entity model and DTOs.

use alumni_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An alumni row from the `alumni` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Alumni {
    pub id: DbId,
    pub student_number: String,
    pub name: String,
    pub major: String,
    pub cohort_year: i32,
    pub graduation_year: i32,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Owning user account.
    pub user_id: DbId,
    pub photo_path: Option<String>,
    pub certificate_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

/// Request body for creating an alumni record.
///
/// `user_id` is only honoured for admins; everyone else always owns the
/// record they create.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlumni {
    pub student_number: String,
    pub name: String,
    pub major: String,
    #[serde(default)]
    pub cohort_year: i32,
    #[serde(default)]
    pub graduation_year: i32,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub user_id: Option<DbId>,
}

impl CreateAlumni {
    /// Resolve the request into a store insert owned by `owner_id`.
    pub fn into_new(self, owner_id: DbId) -> NewAlumni {
        NewAlumni {
            student_number: self.student_number,
            name: self.name,
            major: self.major,
            cohort_year: self.cohort_year,
            graduation_year: self.graduation_year,
            email: self.email,
            phone: self.phone,
            address: self.address,
            user_id: owner_id,
        }
    }
}

/// Store insert for an alumni record with its owner resolved.
#[derive(Debug, Clone)]
pub struct NewAlumni {
    pub student_number: String,
    pub name: String,
    pub major: String,
    pub cohort_year: i32,
    pub graduation_year: i32,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub user_id: DbId,
}

/// Request body for updating an alumni record. Replaces every listed field.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAlumni {
    pub name: String,
    pub major: String,
    #[serde(default)]
    pub cohort_year: i32,
    #[serde(default)]
    pub graduation_year: i32,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}
