//! Employment-record operations, including the trash lifecycle.
//!
//! Ownership of a record is the owner of its alumni. Owners are resolved
//! with trashed alumni included, so a user keeps control over the history
//! of an alumni record they moved to the trash.

use alumni_core::access::{authorize, Actor};
use alumni_core::employment::{validate, REPORT_MIN_SALARY};
use alumni_core::listing::EmploymentQuery;
use alumni_core::types::DbId;
use alumni_db::models::employment::{
    CreateEmployment, EmploymentData, EmploymentFields, EmploymentRecord, GraduateEmployment,
};
use alumni_db::stores::RecordState;
use alumni_db::Stores;

use super::not_found;
use crate::error::AppResult;

const ENTITY: &str = "EmploymentRecord";

fn validated(fields: EmploymentFields) -> AppResult<EmploymentData> {
    let dates = validate(
        &fields.company_name,
        &fields.job_title,
        &fields.start_date,
        fields.end_date.as_deref(),
    )?;
    Ok(EmploymentData::from_fields(fields, dates))
}

async fn owner_of(stores: &Stores, alumni_id: DbId) -> AppResult<Option<DbId>> {
    let alumni = stores.alumni.find_alumni_include_deleted(alumni_id).await?;
    Ok(alumni.map(|a| a.user_id))
}

/// Load a record in `state` and check the actor may act on it.
async fn load_authorized(
    stores: &Stores,
    actor: &Actor,
    id: DbId,
    state: RecordState,
) -> AppResult<EmploymentRecord> {
    let record = stores
        .employment
        .find_employment(id, state)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))?;
    let owner = owner_of(stores, record.alumni_id).await?;
    authorize(actor, owner)?;
    Ok(record)
}

pub async fn list(
    stores: &Stores,
    query: &EmploymentQuery,
) -> AppResult<(Vec<EmploymentRecord>, i64)> {
    let rows = stores.employment.list_employment(query).await?;
    let total = stores.employment.count_employment(query.search()).await?;
    Ok((rows, total))
}

pub async fn get(stores: &Stores, id: DbId) -> AppResult<EmploymentRecord> {
    stores
        .employment
        .find_employment(id, RecordState::Live)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn list_by_alumni(stores: &Stores, alumni_id: DbId) -> AppResult<Vec<EmploymentRecord>> {
    Ok(stores.employment.list_employment_by_alumni(alumni_id).await?)
}

/// Add a record to a live alumni the actor owns (or any, for admins).
pub async fn create(
    stores: &Stores,
    actor: &Actor,
    input: CreateEmployment,
) -> AppResult<EmploymentRecord> {
    let data = validated(input.fields)?;

    let alumni = stores
        .alumni
        .find_alumni(input.alumni_id)
        .await?
        .ok_or_else(|| not_found("Alumni", input.alumni_id))?;
    authorize(actor, Some(alumni.user_id))?;

    let record = stores.employment.create_employment(alumni.id, &data).await?;
    tracing::info!(employment_id = record.id, alumni_id = alumni.id, "Employment record created");
    Ok(record)
}

pub async fn update(
    stores: &Stores,
    actor: &Actor,
    id: DbId,
    fields: EmploymentFields,
) -> AppResult<EmploymentRecord> {
    let data = validated(fields)?;
    load_authorized(stores, actor, id, RecordState::Live).await?;

    stores
        .employment
        .update_employment(id, &data)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

/// Move a live record to the trash.
pub async fn soft_delete(stores: &Stores, actor: &Actor, id: DbId) -> AppResult<()> {
    load_authorized(stores, actor, id, RecordState::Live).await?;
    if !stores.employment.soft_delete_employment(id).await? {
        return Err(not_found(ENTITY, id));
    }
    tracing::info!(employment_id = id, user_id = actor.user_id, "Employment record moved to trash");
    Ok(())
}

/// Bring a trashed record back.
pub async fn restore(stores: &Stores, actor: &Actor, id: DbId) -> AppResult<()> {
    load_authorized(stores, actor, id, RecordState::Trashed).await?;
    if !stores.employment.restore_employment(id).await? {
        return Err(not_found(ENTITY, id));
    }
    tracing::info!(employment_id = id, user_id = actor.user_id, "Employment record restored");
    Ok(())
}

/// Permanently remove a trashed record. Live records are not found here.
pub async fn hard_delete(stores: &Stores, actor: &Actor, id: DbId) -> AppResult<()> {
    load_authorized(stores, actor, id, RecordState::Trashed).await?;
    if !stores.employment.hard_delete_employment(id).await? {
        return Err(not_found(ENTITY, id));
    }
    tracing::info!(
        employment_id = id,
        user_id = actor.user_id,
        "Employment record permanently deleted"
    );
    Ok(())
}

/// The trash as seen by `actor`.
///
/// Admins see every trashed record. Other users see the records of alumni
/// they own; owning no alumni at all is reported as not found rather than
/// as an empty trash.
pub async fn list_trashed(stores: &Stores, actor: &Actor) -> AppResult<Vec<EmploymentRecord>> {
    if actor.is_admin() {
        return Ok(stores.employment.list_trashed_employment(None).await?);
    }

    let owned: Vec<DbId> = stores
        .alumni
        .list_alumni_by_owner(actor.user_id)
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect();
    if owned.is_empty() {
        return Err(not_found("Alumni owned by user", actor.user_id));
    }

    Ok(stores.employment.list_trashed_employment(Some(owned.as_slice())).await?)
}

/// Graduates of `year` holding a job at or above the report salary floor.
pub async fn graduates_with_salary(
    stores: &Stores,
    year: i32,
) -> AppResult<Vec<GraduateEmployment>> {
    Ok(stores
        .employment
        .graduates_with_salary(year, REPORT_MIN_SALARY)
        .await?)
}
