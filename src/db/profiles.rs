use sea_orm::*;
use uuid::Uuid;

use crate::db::unique_slug;
use crate::models::profiles::{self, ProfileResponse, UpdateProfile};
use crate::models::{guides, users};
use crate::slug;

/// Create the profile row for a freshly created user. The slug comes from
/// the username, or the email local part when there is none.
pub async fn create_for_user<C: ConnectionTrait>(
    db: &C,
    user: &users::Model,
) -> Result<profiles::Model, DbErr> {
    let source = user
        .username
        .clone()
        .unwrap_or_else(|| user.email_local_part().to_string());
    let slug = unique_slug::<profiles::Entity, C>(
        db,
        profiles::Column::Slug,
        &slug::base_slug(&source),
    )
    .await?;

    profiles::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        slug: Set(slug),
        bio: Set(None),
        phone_number: Set(None),
        profile_image_url: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

/// Profile of `user`, created on the spot for users that predate profiles.
pub async fn get_or_create_for_user(
    db: &DatabaseConnection,
    user: &users::Model,
) -> Result<profiles::Model, DbErr> {
    match profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(user.id))
        .one(db)
        .await?
    {
        Some(profile) => Ok(profile),
        None => create_for_user(db, user).await,
    }
}

async fn respond(
    db: &DatabaseConnection,
    profile: profiles::Model,
    user: &users::Model,
) -> Result<ProfileResponse, DbErr> {
    let is_guide = guides::Entity::find()
        .filter(guides::Column::UserId.eq(user.id))
        .count(db)
        .await?
        > 0;
    Ok(ProfileResponse {
        profile,
        username: user.username.clone(),
        display_name: user.display_name.clone(),
        is_guide,
    })
}

pub async fn get_own_profile(
    db: &DatabaseConnection,
    user: &users::Model,
) -> Result<ProfileResponse, DbErr> {
    let profile = get_or_create_for_user(db, user).await?;
    respond(db, profile, user).await
}

pub async fn get_profile_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<ProfileResponse, DbErr> {
    let (profile, user) = profiles::Entity::find()
        .filter(profiles::Column::Slug.eq(slug))
        .find_also_related(users::Entity)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;
    let user = user.ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;
    respond(db, profile, &user).await
}

pub async fn update_profile(
    db: &DatabaseConnection,
    user: &users::Model,
    input: UpdateProfile,
) -> Result<ProfileResponse, DbErr> {
    let profile = get_or_create_for_user(db, user).await?;
    let mut active: profiles::ActiveModel = profile.into();

    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(phone_number) = input.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    if let Some(profile_image_url) = input.profile_image_url {
        active.profile_image_url = Set(Some(profile_image_url));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    let profile = active.update(db).await?;
    respond(db, profile, user).await
}
