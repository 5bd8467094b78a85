//! Relational backend: the repositories behind a timeout.

use std::time::Duration;

use alumni_core::listing::{AlumniQuery, EmploymentQuery};
use alumni_core::types::DbId;
use alumni_core::uploads::UploadKind;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::alumni::{Alumni, NewAlumni, UpdateAlumni};
use crate::models::employment::{EmploymentData, EmploymentRecord, GraduateEmployment};
use crate::models::file::{CreateFile, FileRecord};
use crate::models::user::{CreateUser, User};
use crate::repositories::{AlumniRepo, EmploymentRepo, FileRepo, UserRepo};
use crate::stores::{
    bounded, AlumniStore, EmploymentStore, FileStore, RecordState, StoreHealth, StoreResult,
    UserStore,
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        bounded(self.timeout, UserRepo::create(&self.pool, input)).await
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        bounded(self.timeout, UserRepo::find_by_username(&self.pool, username)).await
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        bounded(self.timeout, UserRepo::find_by_id(&self.pool, id)).await
    }
}

#[async_trait]
impl AlumniStore for PgStore {
    async fn list_alumni(&self, query: &AlumniQuery) -> StoreResult<Vec<Alumni>> {
        bounded(self.timeout, AlumniRepo::list(&self.pool, query)).await
    }

    async fn count_alumni(&self, search: Option<&str>) -> StoreResult<i64> {
        bounded(self.timeout, AlumniRepo::count(&self.pool, search)).await
    }

    async fn find_alumni(&self, id: DbId) -> StoreResult<Option<Alumni>> {
        bounded(self.timeout, AlumniRepo::find_by_id(&self.pool, id)).await
    }

    async fn find_alumni_include_deleted(&self, id: DbId) -> StoreResult<Option<Alumni>> {
        bounded(
            self.timeout,
            AlumniRepo::find_by_id_include_deleted(&self.pool, id),
        )
        .await
    }

    async fn list_alumni_by_owner(&self, user_id: DbId) -> StoreResult<Vec<Alumni>> {
        bounded(self.timeout, AlumniRepo::list_by_owner(&self.pool, user_id)).await
    }

    async fn create_alumni(&self, input: &NewAlumni) -> StoreResult<Alumni> {
        bounded(self.timeout, AlumniRepo::create(&self.pool, input)).await
    }

    async fn update_alumni(&self, id: DbId, input: &UpdateAlumni) -> StoreResult<Option<Alumni>> {
        bounded(self.timeout, AlumniRepo::update(&self.pool, id, input)).await
    }

    async fn soft_delete_alumni(&self, id: DbId) -> StoreResult<bool> {
        bounded(self.timeout, AlumniRepo::soft_delete(&self.pool, id)).await
    }

    async fn attach_upload(&self, id: DbId, kind: UploadKind, path: &str) -> StoreResult<bool> {
        bounded(
            self.timeout,
            AlumniRepo::set_upload_path(&self.pool, id, kind, path),
        )
        .await
    }
}

#[async_trait]
impl EmploymentStore for PgStore {
    async fn list_employment(&self, query: &EmploymentQuery) -> StoreResult<Vec<EmploymentRecord>> {
        bounded(self.timeout, EmploymentRepo::list(&self.pool, query)).await
    }

    async fn count_employment(&self, search: Option<&str>) -> StoreResult<i64> {
        bounded(self.timeout, EmploymentRepo::count(&self.pool, search)).await
    }

    async fn find_employment(
        &self,
        id: DbId,
        state: RecordState,
    ) -> StoreResult<Option<EmploymentRecord>> {
        bounded(self.timeout, EmploymentRepo::find_by_id(&self.pool, id, state)).await
    }

    async fn list_employment_by_alumni(
        &self,
        alumni_id: DbId,
    ) -> StoreResult<Vec<EmploymentRecord>> {
        bounded(
            self.timeout,
            EmploymentRepo::list_by_alumni(&self.pool, alumni_id),
        )
        .await
    }

    async fn create_employment(
        &self,
        alumni_id: DbId,
        input: &EmploymentData,
    ) -> StoreResult<EmploymentRecord> {
        bounded(
            self.timeout,
            EmploymentRepo::create(&self.pool, alumni_id, input),
        )
        .await
    }

    async fn update_employment(
        &self,
        id: DbId,
        input: &EmploymentData,
    ) -> StoreResult<Option<EmploymentRecord>> {
        bounded(self.timeout, EmploymentRepo::update(&self.pool, id, input)).await
    }

    async fn soft_delete_employment(&self, id: DbId) -> StoreResult<bool> {
        bounded(self.timeout, EmploymentRepo::soft_delete(&self.pool, id)).await
    }

    async fn restore_employment(&self, id: DbId) -> StoreResult<bool> {
        bounded(self.timeout, EmploymentRepo::restore(&self.pool, id)).await
    }

    async fn hard_delete_employment(&self, id: DbId) -> StoreResult<bool> {
        bounded(self.timeout, EmploymentRepo::hard_delete(&self.pool, id)).await
    }

    async fn list_trashed_employment(
        &self,
        alumni_ids: Option<&[DbId]>,
    ) -> StoreResult<Vec<EmploymentRecord>> {
        bounded(
            self.timeout,
            EmploymentRepo::list_trashed(&self.pool, alumni_ids),
        )
        .await
    }

    async fn graduates_with_salary(
        &self,
        year: i32,
        min_salary: i64,
    ) -> StoreResult<Vec<GraduateEmployment>> {
        bounded(
            self.timeout,
            EmploymentRepo::graduates_with_salary(&self.pool, year, min_salary),
        )
        .await
    }
}

#[async_trait]
impl FileStore for PgStore {
    async fn create_file(&self, input: &CreateFile) -> StoreResult<FileRecord> {
        bounded(self.timeout, FileRepo::create(&self.pool, input)).await
    }

    async fn list_files(&self) -> StoreResult<Vec<FileRecord>> {
        bounded(self.timeout, FileRepo::list(&self.pool)).await
    }

    async fn find_file(&self, id: DbId) -> StoreResult<Option<FileRecord>> {
        bounded(self.timeout, FileRepo::find_by_id(&self.pool, id)).await
    }

    async fn delete_file(&self, id: DbId) -> StoreResult<bool> {
        bounded(self.timeout, FileRepo::delete(&self.pool, id)).await
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        bounded(self.timeout, async {
            sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(&self.pool)
                .await
                .map(|_| ())
        })
        .await
    }
}
