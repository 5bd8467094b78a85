//! Document backend (MongoDB).
//!
//! Documents keep numeric `_id`s allocated from a `counters` collection so
//! that identities look the same as the relational backend's. Calendar
//! dates are stored as `YYYY-MM-DD` strings, which sort chronologically.

use std::collections::HashMap;
use std::time::Duration;

use alumni_core::employment::parse_date;
use alumni_core::listing::{AlumniQuery, EmploymentQuery, SortOrder};
use alumni_core::types::{DbId, Timestamp};
use alumni_core::uploads::UploadKind;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::alumni::{Alumni, NewAlumni, UpdateAlumni};
use crate::models::employment::{EmploymentData, EmploymentRecord, GraduateEmployment};
use crate::models::file::{CreateFile, FileRecord};
use crate::models::user::{CreateUser, User};
use crate::stores::{
    bounded, AlumniStore, EmploymentStore, FileStore, RecordState, StoreHealth, StoreResult,
    UserStore,
};

const USERS: &str = "users";
const ALUMNI: &str = "alumni";
const EMPLOYMENT: &str = "employment_records";
const FILES: &str = "files";
const COUNTERS: &str = "counters";

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

fn to_bson_time(ts: Timestamp) -> bson::DateTime {
    bson::DateTime::from_millis(ts.timestamp_millis())
}

fn from_bson_time(dt: bson::DateTime) -> Timestamp {
    chrono::DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

fn now() -> bson::DateTime {
    to_bson_time(chrono::Utc::now())
}

/// Filter fragment matching live (`Live`) or trashed (`Trashed`) documents.
/// `null` matches both an explicit null and a missing field.
fn state_filter(state: RecordState) -> Bson {
    match state {
        RecordState::Live => Bson::Null,
        RecordState::Trashed => Bson::Document(doc! { "$ne": Bson::Null }),
    }
}

/// Case-insensitive literal match of `term` against any of `fields`.
fn search_filter(search: Option<&str>, fields: &[&str]) -> Document {
    let mut filter = doc! { "deleted_at": Bson::Null };
    if let Some(term) = search {
        let pattern = regex::escape(term);
        let clauses: Vec<Bson> = fields
            .iter()
            .map(|field| {
                let mut clause = Document::new();
                clause.insert(*field, doc! { "$regex": pattern.as_str(), "$options": "i" });
                Bson::Document(clause)
            })
            .collect();
        filter.insert("$or", clauses);
    }
    filter
}

/// Sort on `column` with `_id` as a stable tie-breaker.
fn sort_spec(column: &str, order: SortOrder) -> Document {
    let field = if column == "id" { "_id" } else { column };
    let mut sort = Document::new();
    sort.insert(field, order.direction());
    if field != "_id" {
        sort.insert("_id", 1);
    }
    sort
}

fn page_bounds(offset: i64, limit: i64) -> (u64, i64) {
    (u64::try_from(offset).unwrap_or(0), limit)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDoc {
    #[serde(rename = "_id")]
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: bson::DateTime,
}

impl From<UserDoc> for User {
    fn from(d: UserDoc) -> Self {
        Self {
            id: d.id,
            username: d.username,
            email: d.email,
            password_hash: d.password_hash,
            role: d.role,
            created_at: from_bson_time(d.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AlumniDoc {
    #[serde(rename = "_id")]
    id: i64,
    student_number: String,
    name: String,
    major: String,
    cohort_year: i32,
    graduation_year: i32,
    email: String,
    phone: String,
    address: String,
    user_id: i64,
    photo_path: Option<String>,
    certificate_path: Option<String>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
    deleted_at: Option<bson::DateTime>,
}

impl From<AlumniDoc> for Alumni {
    fn from(d: AlumniDoc) -> Self {
        Self {
            id: d.id,
            student_number: d.student_number,
            name: d.name,
            major: d.major,
            cohort_year: d.cohort_year,
            graduation_year: d.graduation_year,
            email: d.email,
            phone: d.phone,
            address: d.address,
            user_id: d.user_id,
            photo_path: d.photo_path,
            certificate_path: d.certificate_path,
            created_at: from_bson_time(d.created_at),
            updated_at: from_bson_time(d.updated_at),
            deleted_at: d.deleted_at.map(from_bson_time),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmploymentDoc {
    #[serde(rename = "_id")]
    id: i64,
    alumni_id: i64,
    company_name: String,
    job_title: String,
    industry: String,
    location: String,
    salary_range: i64,
    start_date: String,
    end_date: Option<String>,
    status: String,
    description: String,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
    deleted_at: Option<bson::DateTime>,
}

impl TryFrom<EmploymentDoc> for EmploymentRecord {
    type Error = StoreError;

    fn try_from(d: EmploymentDoc) -> Result<Self, Self::Error> {
        let bad_date = |raw: &str| {
            StoreError::Corrupt(format!("employment {} has invalid date '{raw}'", d.id))
        };
        let start_date = parse_date(&d.start_date).ok_or_else(|| bad_date(&d.start_date))?;
        let end_date = match d.end_date.as_deref() {
            None => None,
            Some(raw) => Some(parse_date(raw).ok_or_else(|| bad_date(raw))?),
        };
        Ok(Self {
            id: d.id,
            alumni_id: d.alumni_id,
            company_name: d.company_name,
            job_title: d.job_title,
            industry: d.industry,
            location: d.location,
            salary_range: d.salary_range,
            start_date,
            end_date,
            status: d.status,
            description: d.description,
            created_at: from_bson_time(d.created_at),
            updated_at: from_bson_time(d.updated_at),
            deleted_at: d.deleted_at.map(from_bson_time),
        })
    }
}

fn employment_set(input: &EmploymentData) -> Document {
    doc! {
        "company_name": input.company_name.as_str(),
        "job_title": input.job_title.as_str(),
        "industry": input.industry.as_str(),
        "location": input.location.as_str(),
        "salary_range": input.salary_range,
        "start_date": input.start_date.to_string(),
        "end_date": input.end_date.map(|d| d.to_string()),
        "status": input.status.as_str(),
        "description": input.description.as_str(),
        "updated_at": now(),
    }
}

fn into_records(docs: Vec<EmploymentDoc>) -> StoreResult<Vec<EmploymentRecord>> {
    docs.into_iter().map(EmploymentRecord::try_from).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileDoc {
    #[serde(rename = "_id")]
    id: i64,
    file_name: String,
    original_name: String,
    file_path: String,
    file_size: i64,
    file_type: String,
    uploaded_at: bson::DateTime,
}

impl From<FileDoc> for FileRecord {
    fn from(d: FileDoc) -> Self {
        Self {
            id: d.id,
            file_name: d.file_name,
            original_name: d.original_name,
            file_path: d.file_path,
            file_size: d.file_size,
            file_type: d.file_type,
            uploaded_at: from_bson_time(d.uploaded_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    timeout: Duration,
}

impl MongoStore {
    pub fn new(db: Database, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Create the indexes the store relies on. Idempotent.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let username = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("uq_users_username".to_string())
                    .build(),
            )
            .build();
        let alumni_owner = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        let employment_alumni = IndexModel::builder().keys(doc! { "alumni_id": 1 }).build();

        bounded(self.timeout, async {
            self.users().create_index(username).await?;
            self.alumni().create_index(alumni_owner).await?;
            self.employment().create_index(employment_alumni).await?;
            Ok::<_, mongodb::error::Error>(())
        })
        .await?;
        tracing::debug!("MongoDB indexes ensured");
        Ok(())
    }

    fn users(&self) -> Collection<UserDoc> {
        self.db.collection(USERS)
    }

    fn alumni(&self) -> Collection<AlumniDoc> {
        self.db.collection(ALUMNI)
    }

    fn employment(&self) -> Collection<EmploymentDoc> {
        self.db.collection(EMPLOYMENT)
    }

    fn files(&self) -> Collection<FileDoc> {
        self.db.collection(FILES)
    }

    /// Allocate the next identity for `collection`.
    async fn next_id(&self, collection: &str) -> StoreResult<i64> {
        let counter = self
            .db
            .collection::<Document>(COUNTERS)
            .find_one_and_update(doc! { "_id": collection }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;
        counter
            .as_ref()
            .and_then(|c| c.get_i64("seq").ok())
            .ok_or_else(|| StoreError::Corrupt(format!("counter for '{collection}' is missing")))
    }
}

#[async_trait]
impl UserStore for MongoStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        bounded(self.timeout, async {
            let user = UserDoc {
                id: self.next_id(USERS).await?,
                username: input.username.clone(),
                email: input.email.clone(),
                password_hash: input.password_hash.clone(),
                role: input.role.clone(),
                created_at: now(),
            };
            self.users().insert_one(&user).await?;
            Ok::<_, StoreError>(User::from(user))
        })
        .await
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        bounded(self.timeout, async {
            let found = self.users().find_one(doc! { "username": username }).await?;
            Ok::<_, mongodb::error::Error>(found.map(User::from))
        })
        .await
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        bounded(self.timeout, async {
            let found = self.users().find_one(doc! { "_id": id }).await?;
            Ok::<_, mongodb::error::Error>(found.map(User::from))
        })
        .await
    }
}

const ALUMNI_SEARCH_FIELDS: &[&str] = &["name", "major", "email"];

#[async_trait]
impl AlumniStore for MongoStore {
    async fn list_alumni(&self, query: &AlumniQuery) -> StoreResult<Vec<Alumni>> {
        let (skip, limit) = page_bounds(query.offset(), query.limit);
        bounded(self.timeout, async {
            let docs: Vec<AlumniDoc> = self
                .alumni()
                .find(search_filter(query.search(), ALUMNI_SEARCH_FIELDS))
                .sort(sort_spec(query.sort.column(), query.order))
                .skip(skip)
                .limit(limit)
                .await?
                .try_collect()
                .await?;
            Ok::<_, mongodb::error::Error>(docs.into_iter().map(Alumni::from).collect())
        })
        .await
    }

    async fn count_alumni(&self, search: Option<&str>) -> StoreResult<i64> {
        bounded(self.timeout, async {
            let total = self
                .alumni()
                .count_documents(search_filter(search, ALUMNI_SEARCH_FIELDS))
                .await?;
            Ok::<_, mongodb::error::Error>(i64::try_from(total).unwrap_or(i64::MAX))
        })
        .await
    }

    async fn find_alumni(&self, id: DbId) -> StoreResult<Option<Alumni>> {
        bounded(self.timeout, async {
            let found = self
                .alumni()
                .find_one(doc! { "_id": id, "deleted_at": state_filter(RecordState::Live) })
                .await?;
            Ok::<_, mongodb::error::Error>(found.map(Alumni::from))
        })
        .await
    }

    async fn find_alumni_include_deleted(&self, id: DbId) -> StoreResult<Option<Alumni>> {
        bounded(self.timeout, async {
            let found = self.alumni().find_one(doc! { "_id": id }).await?;
            Ok::<_, mongodb::error::Error>(found.map(Alumni::from))
        })
        .await
    }

    async fn list_alumni_by_owner(&self, user_id: DbId) -> StoreResult<Vec<Alumni>> {
        bounded(self.timeout, async {
            let docs: Vec<AlumniDoc> = self
                .alumni()
                .find(doc! { "user_id": user_id })
                .sort(doc! { "_id": 1 })
                .await?
                .try_collect()
                .await?;
            Ok::<_, mongodb::error::Error>(docs.into_iter().map(Alumni::from).collect())
        })
        .await
    }

    async fn create_alumni(&self, input: &NewAlumni) -> StoreResult<Alumni> {
        bounded(self.timeout, async {
            let stamp = now();
            let alumni = AlumniDoc {
                id: self.next_id(ALUMNI).await?,
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
            self.alumni().insert_one(&alumni).await?;
            Ok::<_, StoreError>(Alumni::from(alumni))
        })
        .await
    }

    async fn update_alumni(&self, id: DbId, input: &UpdateAlumni) -> StoreResult<Option<Alumni>> {
        let update = doc! {
            "$set": {
                "name": input.name.as_str(),
                "major": input.major.as_str(),
                "cohort_year": input.cohort_year,
                "graduation_year": input.graduation_year,
                "email": input.email.as_str(),
                "phone": input.phone.as_str(),
                "address": input.address.as_str(),
                "updated_at": now(),
            }
        };
        bounded(self.timeout, async {
            let updated = self
                .alumni()
                .find_one_and_update(
                    doc! { "_id": id, "deleted_at": state_filter(RecordState::Live) },
                    update,
                )
                .return_document(ReturnDocument::After)
                .await?;
            Ok::<_, mongodb::error::Error>(updated.map(Alumni::from))
        })
        .await
    }

    async fn soft_delete_alumni(&self, id: DbId) -> StoreResult<bool> {
        bounded(self.timeout, async {
            let result = self
                .alumni()
                .update_one(
                    doc! { "_id": id, "deleted_at": state_filter(RecordState::Live) },
                    doc! { "$set": { "deleted_at": now() } },
                )
                .await?;
            Ok::<_, mongodb::error::Error>(result.matched_count > 0)
        })
        .await
    }

    async fn attach_upload(&self, id: DbId, kind: UploadKind, path: &str) -> StoreResult<bool> {
        let field = match kind {
            UploadKind::Photo => "photo_path",
            UploadKind::Certificate => "certificate_path",
        };
        let mut set = doc! { "updated_at": now() };
        set.insert(field, path);
        bounded(self.timeout, async {
            let result = self
                .alumni()
                .update_one(
                    doc! { "_id": id, "deleted_at": state_filter(RecordState::Live) },
                    doc! { "$set": set },
                )
                .await?;
            Ok::<_, mongodb::error::Error>(result.matched_count > 0)
        })
        .await
    }
}

const EMPLOYMENT_SEARCH_FIELDS: &[&str] = &["company_name", "job_title", "industry"];

#[async_trait]
impl EmploymentStore for MongoStore {
    async fn list_employment(&self, query: &EmploymentQuery) -> StoreResult<Vec<EmploymentRecord>> {
        let (skip, limit) = page_bounds(query.offset(), query.limit);
        let docs: Vec<EmploymentDoc> = bounded(self.timeout, async {
            self.employment()
                .find(search_filter(query.search(), EMPLOYMENT_SEARCH_FIELDS))
                .sort(sort_spec(query.sort.column(), query.order))
                .skip(skip)
                .limit(limit)
                .await?
                .try_collect()
                .await
        })
        .await?;
        into_records(docs)
    }

    async fn count_employment(&self, search: Option<&str>) -> StoreResult<i64> {
        bounded(self.timeout, async {
            let total = self
                .employment()
                .count_documents(search_filter(search, EMPLOYMENT_SEARCH_FIELDS))
                .await?;
            Ok::<_, mongodb::error::Error>(i64::try_from(total).unwrap_or(i64::MAX))
        })
        .await
    }

    async fn find_employment(
        &self,
        id: DbId,
        state: RecordState,
    ) -> StoreResult<Option<EmploymentRecord>> {
        let found = bounded(self.timeout, async {
            self.employment()
                .find_one(doc! { "_id": id, "deleted_at": state_filter(state) })
                .await
        })
        .await?;
        found.map(EmploymentRecord::try_from).transpose()
    }

    async fn list_employment_by_alumni(
        &self,
        alumni_id: DbId,
    ) -> StoreResult<Vec<EmploymentRecord>> {
        let docs: Vec<EmploymentDoc> = bounded(self.timeout, async {
            self.employment()
                .find(doc! {
                    "alumni_id": alumni_id,
                    "deleted_at": state_filter(RecordState::Live),
                })
                .sort(doc! { "start_date": -1, "_id": -1 })
                .await?
                .try_collect()
                .await
        })
        .await?;
        into_records(docs)
    }

    async fn create_employment(
        &self,
        alumni_id: DbId,
        input: &EmploymentData,
    ) -> StoreResult<EmploymentRecord> {
        let doc = bounded(self.timeout, async {
            let stamp = now();
            let record = EmploymentDoc {
                id: self.next_id(EMPLOYMENT).await?,
                alumni_id,
                company_name: input.company_name.clone(),
                job_title: input.job_title.clone(),
                industry: input.industry.clone(),
                location: input.location.clone(),
                salary_range: input.salary_range,
                start_date: input.start_date.to_string(),
                end_date: input.end_date.map(|d| d.to_string()),
                status: input.status.clone(),
                description: input.description.clone(),
                created_at: stamp,
                updated_at: stamp,
                deleted_at: None,
            };
            self.employment().insert_one(&record).await?;
            Ok::<_, StoreError>(record)
        })
        .await?;
        EmploymentRecord::try_from(doc)
    }

    async fn update_employment(
        &self,
        id: DbId,
        input: &EmploymentData,
    ) -> StoreResult<Option<EmploymentRecord>> {
        let updated = bounded(self.timeout, async {
            self.employment()
                .find_one_and_update(
                    doc! { "_id": id, "deleted_at": state_filter(RecordState::Live) },
                    doc! { "$set": employment_set(input) },
                )
                .return_document(ReturnDocument::After)
                .await
        })
        .await?;
        updated.map(EmploymentRecord::try_from).transpose()
    }

    async fn soft_delete_employment(&self, id: DbId) -> StoreResult<bool> {
        bounded(self.timeout, async {
            let result = self
                .employment()
                .update_one(
                    doc! { "_id": id, "deleted_at": state_filter(RecordState::Live) },
                    doc! { "$set": { "deleted_at": now() } },
                )
                .await?;
            Ok::<_, mongodb::error::Error>(result.matched_count > 0)
        })
        .await
    }

    async fn restore_employment(&self, id: DbId) -> StoreResult<bool> {
        bounded(self.timeout, async {
            let result = self
                .employment()
                .update_one(
                    doc! { "_id": id, "deleted_at": state_filter(RecordState::Trashed) },
                    doc! { "$set": { "deleted_at": Bson::Null } },
                )
                .await?;
            Ok::<_, mongodb::error::Error>(result.matched_count > 0)
        })
        .await
    }

    async fn hard_delete_employment(&self, id: DbId) -> StoreResult<bool> {
        bounded(self.timeout, async {
            let result = self
                .employment()
                .delete_one(doc! { "_id": id, "deleted_at": state_filter(RecordState::Trashed) })
                .await?;
            Ok::<_, mongodb::error::Error>(result.deleted_count > 0)
        })
        .await
    }

    async fn list_trashed_employment(
        &self,
        alumni_ids: Option<&[DbId]>,
    ) -> StoreResult<Vec<EmploymentRecord>> {
        let mut filter = doc! { "deleted_at": state_filter(RecordState::Trashed) };
        if let Some(ids) = alumni_ids {
            filter.insert("alumni_id", doc! { "$in": ids.to_vec() });
        }
        let docs: Vec<EmploymentDoc> = bounded(self.timeout, async {
            self.employment()
                .find(filter)
                .sort(doc! { "deleted_at": -1, "_id": -1 })
                .await?
                .try_collect()
                .await
        })
        .await?;
        into_records(docs)
    }

    async fn graduates_with_salary(
        &self,
        year: i32,
        min_salary: i64,
    ) -> StoreResult<Vec<GraduateEmployment>> {
        let (graduates, jobs) = bounded(self.timeout, async {
            let graduates: Vec<AlumniDoc> = self
                .alumni()
                .find(doc! {
                    "graduation_year": year,
                    "deleted_at": state_filter(RecordState::Live),
                })
                .await?
                .try_collect()
                .await?;
            let ids: Vec<i64> = graduates.iter().map(|a| a.id).collect();
            let jobs: Vec<EmploymentDoc> = self
                .employment()
                .find(doc! {
                    "alumni_id": { "$in": ids },
                    "salary_range": { "$gte": min_salary },
                    "deleted_at": state_filter(RecordState::Live),
                })
                .sort(doc! { "alumni_id": 1, "_id": 1 })
                .await?
                .try_collect()
                .await?;
            Ok::<_, mongodb::error::Error>((graduates, jobs))
        })
        .await?;

        let by_id: HashMap<i64, &AlumniDoc> = graduates.iter().map(|a| (a.id, a)).collect();
        Ok(jobs
            .into_iter()
            .filter_map(|job| {
                by_id.get(&job.alumni_id).map(|a| GraduateEmployment {
                    alumni_id: a.id,
                    name: a.name.clone(),
                    major: a.major.clone(),
                    graduation_year: a.graduation_year,
                    industry: job.industry,
                    company_name: job.company_name,
                    job_title: job.job_title,
                    salary_range: job.salary_range,
                })
            })
            .collect())
    }
}

#[async_trait]
impl FileStore for MongoStore {
    async fn create_file(&self, input: &CreateFile) -> StoreResult<FileRecord> {
        bounded(self.timeout, async {
            let file = FileDoc {
                id: self.next_id(FILES).await?,
                file_name: input.file_name.clone(),
                original_name: input.original_name.clone(),
                file_path: input.file_path.clone(),
                file_size: input.file_size,
                file_type: input.file_type.clone(),
                uploaded_at: now(),
            };
            self.files().insert_one(&file).await?;
            Ok::<_, StoreError>(FileRecord::from(file))
        })
        .await
    }

    async fn list_files(&self) -> StoreResult<Vec<FileRecord>> {
        bounded(self.timeout, async {
            let docs: Vec<FileDoc> = self
                .files()
                .find(doc! {})
                .sort(doc! { "uploaded_at": -1, "_id": -1 })
                .await?
                .try_collect()
                .await?;
            Ok::<_, mongodb::error::Error>(docs.into_iter().map(FileRecord::from).collect())
        })
        .await
    }

    async fn find_file(&self, id: DbId) -> StoreResult<Option<FileRecord>> {
        bounded(self.timeout, async {
            let found = self.files().find_one(doc! { "_id": id }).await?;
            Ok::<_, mongodb::error::Error>(found.map(FileRecord::from))
        })
        .await
    }

    async fn delete_file(&self, id: DbId) -> StoreResult<bool> {
        bounded(self.timeout, async {
            let result = self.files().delete_one(doc! { "_id": id }).await?;
            Ok::<_, mongodb::error::Error>(result.deleted_count > 0)
        })
        .await
    }
}

#[async_trait]
impl StoreHealth for MongoStore {
    async fn ping(&self) -> StoreResult<()> {
        bounded(self.timeout, async {
            self.db.run_command(doc! { "ping": 1 }).await.map(|_| ())
        })
        .await
    }
}
