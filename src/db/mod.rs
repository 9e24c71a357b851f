pub mod badges;
pub mod blog;
pub mod gallery;
pub mod guides;
pub mod locations;
pub mod packages;
pub mod pages;
pub mod profiles;
pub mod reviews;
pub mod schedules;
pub mod users;
pub mod videos;
pub mod vocab;

use sea_orm::*;

use crate::error::ApiError;
use crate::slug;

/// Connect the SeaORM pool. Statement logging is off; query failures are
/// reported through `ApiError`.
pub async fn create_pool(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    Database::connect(options).await
}

/// First free slug for `base` in `column` (`base`, `base-2`, `base-3`, ...).
pub async fn unique_slug<E, C>(db: &C, column: E::Column, base: &str) -> Result<String, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let taken: Vec<String> = E::find()
        .select_only()
        .column(column)
        .filter(
            Condition::any()
                .add(column.eq(base))
                .add(column.starts_with(format!("{base}-"))),
        )
        .into_tuple()
        .all(db)
        .await?;
    Ok(slug::pick_unique(base, &taken))
}

/// Slug for a new row: the caller's own slug if given (must be free), or one
/// derived from `source` with a numeric suffix on collision.
pub async fn slug_for_new<E, C>(
    db: &C,
    column: E::Column,
    requested: Option<&str>,
    source: &str,
) -> Result<String, ApiError>
where
    E: EntityTrait,
    E::Model: Sync,
    C: ConnectionTrait,
{
    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        Some(wanted) => {
            let wanted = slug::slugify(wanted);
            if wanted.is_empty() {
                return Err(ApiError::invalid("slug", "Enter a valid slug"));
            }
            let exists = E::find().filter(column.eq(wanted.as_str())).count(db).await? > 0;
            if exists {
                return Err(ApiError::invalid("slug", "This slug is already in use"));
            }
            Ok(wanted)
        }
        None => Ok(unique_slug::<E, C>(db, column, &slug::base_slug(source)).await?),
    }
}

/// Reject a new row once `current` rows already reach `limit`.
pub fn ensure_capacity(current: u64, limit: u64, what: &str) -> Result<(), ApiError> {
    if current >= limit {
        return Err(ApiError::Capacity(format!(
            "You can add at most {limit} {what}. Delete some first."
        )));
    }
    Ok(())
}
