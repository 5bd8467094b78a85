//! The storage contract.
//!
//! Every backend implements the same five traits. Handlers and services only
//! ever see [`Stores`], so the relational, document and in-memory backends
//! are interchangeable at startup.
//!
//! Conventions shared by all implementations:
//! - Lookups return `Ok(None)` for absent *or* soft-deleted rows unless the
//!   method says otherwise.
//! - Mutations return `Ok(false)` when no row was in the expected state.
//! - Every backend call is bounded by the configured store timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use alumni_core::listing::{AlumniQuery, EmploymentQuery};
use alumni_core::types::DbId;
use alumni_core::uploads::UploadKind;
use async_trait::async_trait;

use crate::backends::mongo::MongoStore;
use crate::backends::postgres::PgStore;
use crate::error::StoreError;
use crate::models::alumni::{Alumni, NewAlumni, UpdateAlumni};
use crate::models::employment::{EmploymentData, EmploymentRecord, GraduateEmployment};
use crate::models::file::{CreateFile, FileRecord};
use crate::models::user::{CreateUser, User};

pub type StoreResult<T> = Result<T, StoreError>;

/// Default per-operation timeout.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Which side of the soft-delete lifecycle a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// `deleted_at` is unset.
    Live,
    /// `deleted_at` is set (the record is in the trash).
    Trashed,
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. A taken username fails with [`StoreError::Duplicate`].
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>>;
}

#[async_trait]
pub trait AlumniStore: Send + Sync {
    /// One page of live alumni matching the query.
    async fn list_alumni(&self, query: &AlumniQuery) -> StoreResult<Vec<Alumni>>;

    /// Number of live alumni matching `search` (name, major or email).
    async fn count_alumni(&self, search: Option<&str>) -> StoreResult<i64>;

    async fn find_alumni(&self, id: DbId) -> StoreResult<Option<Alumni>>;

    /// Like [`find_alumni`](Self::find_alumni) but also returns trashed rows.
    async fn find_alumni_include_deleted(&self, id: DbId) -> StoreResult<Option<Alumni>>;

    /// All alumni owned by `user_id`, trashed ones included.
    async fn list_alumni_by_owner(&self, user_id: DbId) -> StoreResult<Vec<Alumni>>;

    async fn create_alumni(&self, input: &NewAlumni) -> StoreResult<Alumni>;

    /// Replace the editable fields of a live record. `None` if no live
    /// record has this id.
    async fn update_alumni(&self, id: DbId, input: &UpdateAlumni) -> StoreResult<Option<Alumni>>;

    async fn soft_delete_alumni(&self, id: DbId) -> StoreResult<bool>;

    /// Record the path of an uploaded photo or certificate on a live record.
    async fn attach_upload(&self, id: DbId, kind: UploadKind, path: &str) -> StoreResult<bool>;
}

#[async_trait]
pub trait EmploymentStore: Send + Sync {
    async fn list_employment(&self, query: &EmploymentQuery) -> StoreResult<Vec<EmploymentRecord>>;

    /// Number of live records matching `search` (company, job title or
    /// industry).
    async fn count_employment(&self, search: Option<&str>) -> StoreResult<i64>;

    async fn find_employment(
        &self,
        id: DbId,
        state: RecordState,
    ) -> StoreResult<Option<EmploymentRecord>>;

    /// Live records of one alumni, newest start date first.
    async fn list_employment_by_alumni(
        &self,
        alumni_id: DbId,
    ) -> StoreResult<Vec<EmploymentRecord>>;

    async fn create_employment(
        &self,
        alumni_id: DbId,
        input: &EmploymentData,
    ) -> StoreResult<EmploymentRecord>;

    async fn update_employment(
        &self,
        id: DbId,
        input: &EmploymentData,
    ) -> StoreResult<Option<EmploymentRecord>>;

    /// Live -> trashed.
    async fn soft_delete_employment(&self, id: DbId) -> StoreResult<bool>;

    /// Trashed -> live.
    async fn restore_employment(&self, id: DbId) -> StoreResult<bool>;

    /// Remove a trashed record for good. Live records are left untouched.
    async fn hard_delete_employment(&self, id: DbId) -> StoreResult<bool>;

    /// Trashed records, optionally restricted to the given alumni.
    async fn list_trashed_employment(
        &self,
        alumni_ids: Option<&[DbId]>,
    ) -> StoreResult<Vec<EmploymentRecord>>;

    /// Live alumni graduating in `year` joined with their live records whose
    /// salary range is at least `min_salary`.
    async fn graduates_with_salary(
        &self,
        year: i32,
        min_salary: i64,
    ) -> StoreResult<Vec<GraduateEmployment>>;
}

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn create_file(&self, input: &CreateFile) -> StoreResult<FileRecord>;

    /// All file metadata, newest first.
    async fn list_files(&self) -> StoreResult<Vec<FileRecord>>;

    async fn find_file(&self, id: DbId) -> StoreResult<Option<FileRecord>>;

    async fn delete_file(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Round-trip to the backing engine.
    async fn ping(&self) -> StoreResult<()>;
}

/// Every trait a complete backend implements.
pub trait Backend:
    UserStore + AlumniStore + EmploymentStore + FileStore + StoreHealth + 'static
{
}

impl<T> Backend for T where
    T: UserStore + AlumniStore + EmploymentStore + FileStore + StoreHealth + 'static
{
}

// ---------------------------------------------------------------------------
// Handle bundle
// ---------------------------------------------------------------------------

/// Cloneable set of store handles shared through application state.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub alumni: Arc<dyn AlumniStore>,
    pub employment: Arc<dyn EmploymentStore>,
    pub files: Arc<dyn FileStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl Stores {
    /// Wrap a single backend that implements every store.
    pub fn from_backend<B: Backend>(backend: B) -> Self {
        let backend = Arc::new(backend);
        Self {
            users: backend.clone(),
            alumni: backend.clone(),
            employment: backend.clone(),
            files: backend.clone(),
            health: backend,
        }
    }

    /// Relational backend over an existing pool.
    pub fn postgres(pool: sqlx::PgPool, timeout: Duration) -> Self {
        Self::from_backend(PgStore::new(pool, timeout))
    }

    /// Document backend. Creates the indexes it relies on before returning.
    pub async fn mongo(database: mongodb::Database, timeout: Duration) -> StoreResult<Self> {
        let store = MongoStore::new(database, timeout);
        store.ensure_indexes().await?;
        Ok(Self::from_backend(store))
    }

    /// Empty in-memory backend.
    #[cfg(any(test, feature = "memory"))]
    pub fn memory() -> Self {
        Self::from_backend(crate::backends::memory::MemoryStore::default())
    }
}

/// Run a backend future under `limit`, converting its error into
/// [`StoreError`].
pub(crate) async fn bounded<T, E, F>(limit: Duration, fut: F) -> StoreResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<StoreError>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            tracing::warn!(timeout = ?limit, "Store operation timed out");
            Err(StoreError::Timeout(limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn bounded_passes_through_result() {
        let value = bounded(Duration::from_secs(1), async { Ok::<_, StoreError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn bounded_times_out() {
        let result = bounded(Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, StoreError>(())
        })
        .await;
        assert_matches!(result, Err(StoreError::Timeout(_)));
    }
}
