use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::db::profiles;
use crate::models::users::{self, CreateUserFromAuth, Roles};

/// Find the user for these token claims, creating the user and its profile
/// on first sight. Both rows are written in one transaction.
pub async fn find_or_create_from_auth(
    db: &DatabaseConnection,
    input: CreateUserFromAuth,
) -> Result<users::Model, DbErr> {
    if let Some(existing) = users::Entity::find_by_id(input.id).one(db).await? {
        return Ok(existing);
    }

    let txn = db.begin().await?;

    let new_user = users::ActiveModel {
        id: Set(input.id),
        email: Set(input.email),
        username: Set(None),
        display_name: Set(input.display_name),
        avatar_url: Set(input.avatar_url),
        auth_provider: Set(input.auth_provider),
        role: Set(Roles::Traveler),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    // Two first requests for the same token can race here; the loser sees
    // zero inserted rows and reads the winner's user instead.
    let inserted = users::Entity::insert(new_user)
        .on_conflict(OnConflict::column(users::Column::Id).do_nothing().to_owned())
        .exec_without_returning(&txn)
        .await?;

    if inserted == 0 {
        txn.rollback().await?;
        return users::Entity::find_by_id(input.id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("User not found".to_string()));
    }

    let user = users::Entity::find_by_id(input.id)
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;
    profiles::create_for_user(&txn, &user).await?;
    txn.commit().await?;

    tracing::info!(user_id = %user.id, "created user and profile from auth claims");
    Ok(user)
}

/// Change a user's role inside an open transaction.
pub async fn set_role<C: ConnectionTrait>(
    db: &C,
    user: users::Model,
    role: Roles,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();
    active.role = Set(role);
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await
}

pub async fn set_display_name<C: ConnectionTrait>(
    db: &C,
    user: users::Model,
    display_name: String,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();
    active.display_name = Set(Some(display_name));
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await
}
