//! Alumni profile operations.

use alumni_core::access::{authorize, Actor};
use alumni_core::alumni::{validate_create, validate_update};
use alumni_core::listing::AlumniQuery;
use alumni_core::types::DbId;
use alumni_db::models::alumni::{Alumni, CreateAlumni, UpdateAlumni};
use alumni_db::Stores;

use super::not_found;
use crate::error::AppResult;

const ENTITY: &str = "Alumni";

/// One page of live alumni plus the total match count.
pub async fn list(stores: &Stores, query: &AlumniQuery) -> AppResult<(Vec<Alumni>, i64)> {
    let rows = stores.alumni.list_alumni(query).await?;
    let total = stores.alumni.count_alumni(query.search()).await?;
    Ok((rows, total))
}

pub async fn get(stores: &Stores, id: DbId) -> AppResult<Alumni> {
    stores
        .alumni
        .find_alumni(id)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

/// Create an alumni record.
///
/// Non-admins always own what they create. Admins may assign another
/// existing user and default to themselves.
pub async fn create(stores: &Stores, actor: &Actor, input: CreateAlumni) -> AppResult<Alumni> {
    validate_create(&input.student_number, &input.name, &input.major, &input.email)?;

    let owner_id = match input.user_id {
        Some(requested) if actor.is_admin() && requested != actor.user_id => {
            stores
                .users
                .find_user_by_id(requested)
                .await?
                .ok_or_else(|| not_found("User", requested))?;
            requested
        }
        _ => actor.user_id,
    };

    let alumni = stores.alumni.create_alumni(&input.into_new(owner_id)).await?;
    tracing::info!(alumni_id = alumni.id, owner_id, "Alumni created");
    Ok(alumni)
}

pub async fn update(
    stores: &Stores,
    actor: &Actor,
    id: DbId,
    input: UpdateAlumni,
) -> AppResult<Alumni> {
    validate_update(&input.name, &input.major, &input.email)?;

    let existing = get(stores, id).await?;
    authorize(actor, Some(existing.user_id))?;

    stores
        .alumni
        .update_alumni(id, &input)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn soft_delete(stores: &Stores, actor: &Actor, id: DbId) -> AppResult<()> {
    let existing = get(stores, id).await?;
    authorize(actor, Some(existing.user_id))?;

    if !stores.alumni.soft_delete_alumni(id).await? {
        return Err(not_found(ENTITY, id));
    }
    tracing::info!(alumni_id = id, user_id = actor.user_id, "Alumni moved to trash");
    Ok(())
}
