//! In-memory backend keyed by identity.
//!
//! Mirrors the relational semantics closely enough for service and HTTP
//! tests: soft-delete markers, owner scans including trashed rows, the
//! same sort allow-lists and case-insensitive search.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use alumni_core::listing::{
    matches_term, AlumniQuery, AlumniSort, EmploymentQuery, EmploymentSort, SortOrder,
};
use alumni_core::types::{DbId, Timestamp};
use alumni_core::uploads::UploadKind;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::alumni::{Alumni, NewAlumni, UpdateAlumni};
use crate::models::employment::{EmploymentData, EmploymentRecord, GraduateEmployment};
use crate::models::file::{CreateFile, FileRecord};
use crate::models::user::{CreateUser, User};
use crate::stores::{
    AlumniStore, EmploymentStore, FileStore, RecordState, StoreHealth, StoreResult, UserStore,
};

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: BTreeMap<DbId, User>,
    alumni: BTreeMap<DbId, Alumni>,
    employment: BTreeMap<DbId, EmploymentRecord>,
    files: BTreeMap<DbId, FileRecord>,
}

impl Tables {
    fn allocate(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

fn now() -> Timestamp {
    Utc::now()
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn page<T: Clone>(rows: Vec<&T>, offset: i64, limit: i64) -> Vec<T> {
    rows.into_iter()
        .skip(usize::try_from(offset).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(0))
        .cloned()
        .collect()
}

fn alumni_matches(a: &Alumni, search: Option<&str>) -> bool {
    a.deleted_at.is_none()
        && search.map_or(true, |term| {
            matches_term(&a.name, term)
                || matches_term(&a.major, term)
                || matches_term(&a.email, term)
        })
}

fn alumni_cmp(a: &Alumni, b: &Alumni, sort: AlumniSort) -> Ordering {
    match sort {
        AlumniSort::Id => a.id.cmp(&b.id),
        AlumniSort::Name => a.name.cmp(&b.name),
        AlumniSort::Major => a.major.cmp(&b.major),
        AlumniSort::CohortYear => a.cohort_year.cmp(&b.cohort_year),
        AlumniSort::GraduationYear => a.graduation_year.cmp(&b.graduation_year),
        AlumniSort::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn employment_matches(e: &EmploymentRecord, search: Option<&str>) -> bool {
    e.deleted_at.is_none()
        && search.map_or(true, |term| {
            matches_term(&e.company_name, term)
                || matches_term(&e.job_title, term)
                || matches_term(&e.industry, term)
        })
}

fn employment_cmp(a: &EmploymentRecord, b: &EmploymentRecord, sort: EmploymentSort) -> Ordering {
    match sort {
        EmploymentSort::Id => a.id.cmp(&b.id),
        EmploymentSort::CompanyName => a.company_name.cmp(&b.company_name),
        EmploymentSort::JobTitle => a.job_title.cmp(&b.job_title),
        EmploymentSort::Industry => a.industry.cmp(&b.industry),
        EmploymentSort::SalaryRange => a.salary_range.cmp(&b.salary_range),
        EmploymentSort::StartDate => a.start_date.cmp(&b.start_date),
        EmploymentSort::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn apply(record: &mut EmploymentRecord, input: &EmploymentData) {
    record.company_name = input.company_name.clone();
    record.job_title = input.job_title.clone();
    record.industry = input.industry.clone();
    record.location = input.location.clone();
    record.salary_range = input.salary_range;
    record.start_date = input.start_date;
    record.end_date = input.end_date;
    record.status = input.status.clone();
    record.description = input.description.clone();
    record.updated_at = now();
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.username == input.username) {
            return Err(StoreError::Duplicate("uq_users_username".into()));
        }
        let user = User {
            id: t.allocate(),
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            created_at: now(),
        };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }
}

#[async_trait]
impl AlumniStore for MemoryStore {
    async fn list_alumni(&self, query: &AlumniQuery) -> StoreResult<Vec<Alumni>> {
        let t = self.tables.read().await;
        let mut rows: Vec<&Alumni> = t
            .alumni
            .values()
            .filter(|a| alumni_matches(a, query.search()))
            .collect();
        rows.sort_by(|a, b| {
            directed(alumni_cmp(a, b, query.sort), query.order).then(a.id.cmp(&b.id))
        });
        Ok(page(rows, query.offset(), query.limit))
    }

    async fn count_alumni(&self, search: Option<&str>) -> StoreResult<i64> {
        let t = self.tables.read().await;
        Ok(t.alumni.values().filter(|a| alumni_matches(a, search)).count() as i64)
    }

    async fn find_alumni(&self, id: DbId) -> StoreResult<Option<Alumni>> {
        let t = self.tables.read().await;
        Ok(t.alumni.get(&id).filter(|a| a.deleted_at.is_none()).cloned())
    }

    async fn find_alumni_include_deleted(&self, id: DbId) -> StoreResult<Option<Alumni>> {
        Ok(self.tables.read().await.alumni.get(&id).cloned())
    }

    async fn list_alumni_by_owner(&self, user_id: DbId) -> StoreResult<Vec<Alumni>> {
        let t = self.tables.read().await;
        Ok(t.alumni.values().filter(|a| a.user_id == user_id).cloned().collect())
    }

    async fn create_alumni(&self, input: &NewAlumni) -> StoreResult<Alumni> {
        let mut t = self.tables.write().await;
        let stamp = now();
        let alumni = Alumni {
            id: t.allocate(),
            student_number: input.student_number.clone(),
            name: input.name.clone(),
            major: input.major.clone(),
            cohort_year: input.cohort_year,
            graduation_year: input.graduation_year,
            email: input.email.clone(),
            phone: input.phone.clone(),
            address: input.address.clone(),
            user_id: input.user_id,
            photo_path: None,
            certificate_path: None,
            created_at: stamp,
            updated_at: stamp,
            deleted_at: None,
        };
        t.alumni.insert(alumni.id, alumni.clone());
        Ok(alumni)
    }

    async fn update_alumni(&self, id: DbId, input: &UpdateAlumni) -> StoreResult<Option<Alumni>> {
        let mut t = self.tables.write().await;
        let Some(a) = t.alumni.get_mut(&id).filter(|a| a.deleted_at.is_none()) else {
            return Ok(None);
        };
        a.name = input.name.clone();
        a.major = input.major.clone();
        a.cohort_year = input.cohort_year;
        a.graduation_year = input.graduation_year;
        a.email = input.email.clone();
        a.phone = input.phone.clone();
        a.address = input.address.clone();
        a.updated_at = now();
        Ok(Some(a.clone()))
    }

    async fn soft_delete_alumni(&self, id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        match t.alumni.get_mut(&id).filter(|a| a.deleted_at.is_none()) {
            Some(a) => {
                a.deleted_at = Some(now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn attach_upload(&self, id: DbId, kind: UploadKind, path: &str) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        let Some(a) = t.alumni.get_mut(&id).filter(|a| a.deleted_at.is_none()) else {
            return Ok(false);
        };
        match kind {
            UploadKind::Photo => a.photo_path = Some(path.to_string()),
            UploadKind::Certificate => a.certificate_path = Some(path.to_string()),
        }
        a.updated_at = now();
        Ok(true)
    }
}

#[async_trait]
impl EmploymentStore for MemoryStore {
    async fn list_employment(&self, query: &EmploymentQuery) -> StoreResult<Vec<EmploymentRecord>> {
        let t = self.tables.read().await;
        let mut rows: Vec<&EmploymentRecord> = t
            .employment
            .values()
            .filter(|e| employment_matches(e, query.search()))
            .collect();
        rows.sort_by(|a, b| {
            directed(employment_cmp(a, b, query.sort), query.order).then(a.id.cmp(&b.id))
        });
        Ok(page(rows, query.offset(), query.limit))
    }

    async fn count_employment(&self, search: Option<&str>) -> StoreResult<i64> {
        let t = self.tables.read().await;
        Ok(t.employment
            .values()
            .filter(|e| employment_matches(e, search))
            .count() as i64)
    }

    async fn find_employment(
        &self,
        id: DbId,
        state: RecordState,
    ) -> StoreResult<Option<EmploymentRecord>> {
        let t = self.tables.read().await;
        Ok(t.employment
            .get(&id)
            .filter(|e| match state {
                RecordState::Live => e.deleted_at.is_none(),
                RecordState::Trashed => e.deleted_at.is_some(),
            })
            .cloned())
    }

    async fn list_employment_by_alumni(
        &self,
        alumni_id: DbId,
    ) -> StoreResult<Vec<EmploymentRecord>> {
        let t = self.tables.read().await;
        let mut rows: Vec<EmploymentRecord> = t
            .employment
            .values()
            .filter(|e| e.alumni_id == alumni_id && e.deleted_at.is_none())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn create_employment(
        &self,
        alumni_id: DbId,
        input: &EmploymentData,
    ) -> StoreResult<EmploymentRecord> {
        let mut t = self.tables.write().await;
        let stamp = now();
        let mut record = EmploymentRecord {
            id: t.allocate(),
            alumni_id,
            company_name: String::new(),
            job_title: String::new(),
            industry: String::new(),
            location: String::new(),
            salary_range: 0,
            start_date: input.start_date,
            end_date: None,
            status: String::new(),
            description: String::new(),
            created_at: stamp,
            updated_at: stamp,
            deleted_at: None,
        };
        apply(&mut record, input);
        record.updated_at = stamp;
        t.employment.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_employment(
        &self,
        id: DbId,
        input: &EmploymentData,
    ) -> StoreResult<Option<EmploymentRecord>> {
        let mut t = self.tables.write().await;
        let Some(record) = t.employment.get_mut(&id).filter(|e| e.deleted_at.is_none()) else {
            return Ok(None);
        };
        apply(record, input);
        Ok(Some(record.clone()))
    }

    async fn soft_delete_employment(&self, id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        match t.employment.get_mut(&id).filter(|e| e.deleted_at.is_none()) {
            Some(e) => {
                e.deleted_at = Some(now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn restore_employment(&self, id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        match t.employment.get_mut(&id).filter(|e| e.deleted_at.is_some()) {
            Some(e) => {
                e.deleted_at = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn hard_delete_employment(&self, id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        let trashed = t.employment.get(&id).is_some_and(|e| e.deleted_at.is_some());
        if trashed {
            t.employment.remove(&id);
        }
        Ok(trashed)
    }

    async fn list_trashed_employment(
        &self,
        alumni_ids: Option<&[DbId]>,
    ) -> StoreResult<Vec<EmploymentRecord>> {
        let t = self.tables.read().await;
        let mut rows: Vec<EmploymentRecord> = t
            .employment
            .values()
            .filter(|e| e.deleted_at.is_some())
            .filter(|e| alumni_ids.map_or(true, |ids| ids.contains(&e.alumni_id)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn graduates_with_salary(
        &self,
        year: i32,
        min_salary: i64,
    ) -> StoreResult<Vec<GraduateEmployment>> {
        let t = self.tables.read().await;
        let mut rows = Vec::new();
        for a in t
            .alumni
            .values()
            .filter(|a| a.graduation_year == year && a.deleted_at.is_none())
        {
            for e in t.employment.values().filter(|e| {
                e.alumni_id == a.id && e.deleted_at.is_none() && e.salary_range >= min_salary
            }) {
                rows.push(GraduateEmployment {
                    alumni_id: a.id,
                    name: a.name.clone(),
                    major: a.major.clone(),
                    graduation_year: a.graduation_year,
                    industry: e.industry.clone(),
                    company_name: e.company_name.clone(),
                    job_title: e.job_title.clone(),
                    salary_range: e.salary_range,
                });
            }
        }
        Ok(rows)
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn create_file(&self, input: &CreateFile) -> StoreResult<FileRecord> {
        let mut t = self.tables.write().await;
        let file = FileRecord {
            id: t.allocate(),
            file_name: input.file_name.clone(),
            original_name: input.original_name.clone(),
            file_path: input.file_path.clone(),
            file_size: input.file_size,
            file_type: input.file_type.clone(),
            uploaded_at: now(),
        };
        t.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn list_files(&self) -> StoreResult<Vec<FileRecord>> {
        let t = self.tables.read().await;
        Ok(t.files.values().rev().cloned().collect())
    }

    async fn find_file(&self, id: DbId) -> StoreResult<Option<FileRecord>> {
        Ok(self.tables.read().await.files.get(&id).cloned())
    }

    async fn delete_file(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.files.remove(&id).is_some())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
