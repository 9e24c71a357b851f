use sea_orm::*;
use uuid::Uuid;

use crate::db::ensure_capacity;
use crate::error::ApiResult;
use crate::models::gallery::{self, CreateGalleryItem, GALLERY_LIMIT, UpdateGalleryItem};
use crate::models::guides;

/// Gallery in display order (`sort_order`, then newest first).
pub async fn list_for_guide(
    db: &DatabaseConnection,
    guide_id: Uuid,
) -> Result<Vec<gallery::Model>, DbErr> {
    gallery::Entity::find()
        .filter(gallery::Column::GuideId.eq(guide_id))
        .order_by_asc(gallery::Column::SortOrder)
        .order_by_desc(gallery::Column::CreatedAt)
        .all(db)
        .await
}

/// Owner view: newest first.
pub async fn list_recent_for_guide(
    db: &DatabaseConnection,
    guide_id: Uuid,
) -> Result<Vec<gallery::Model>, DbErr> {
    gallery::Entity::find()
        .filter(gallery::Column::GuideId.eq(guide_id))
        .order_by_desc(gallery::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn count_for_guide<C: ConnectionTrait>(db: &C, guide_id: Uuid) -> Result<u64, DbErr> {
    gallery::Entity::find()
        .filter(gallery::Column::GuideId.eq(guide_id))
        .count(db)
        .await
}

pub async fn get_owned_item(
    db: &DatabaseConnection,
    guide_id: Uuid,
    id: Uuid,
) -> Result<Option<gallery::Model>, DbErr> {
    gallery::Entity::find_by_id(id)
        .filter(gallery::Column::GuideId.eq(guide_id))
        .one(db)
        .await
}

/// Add an image unless the guide already has `GALLERY_LIMIT` of them. The
/// guide row is locked for the count so two concurrent uploads cannot both
/// pass the check.
pub async fn insert_item(
    db: &DatabaseConnection,
    guide_id: Uuid,
    input: CreateGalleryItem,
) -> ApiResult<gallery::Model> {
    let txn = db.begin().await?;
    guides::Entity::find_by_id(guide_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("Guide not found".to_string()))?;

    let current = count_for_guide(&txn, guide_id).await?;
    ensure_capacity(current, GALLERY_LIMIT, "images")?;

    let item = gallery::ActiveModel {
        id: Set(Uuid::new_v4()),
        guide_id: Set(guide_id),
        image_url: Set(input.image_url),
        title: Set(input.title),
        description: Set(input.description),
        sort_order: Set(input.sort_order),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(item)
}

pub async fn update_item(
    db: &DatabaseConnection,
    item: gallery::Model,
    input: UpdateGalleryItem,
) -> Result<gallery::Model, DbErr> {
    let mut active: gallery::ActiveModel = item.into();

    if let Some(image_url) = input.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(sort_order) = input.sort_order {
        active.sort_order = Set(sort_order);
    }

    active.update(db).await
}

pub async fn delete_item(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    gallery::Entity::delete_by_id(id).exec(db).await
}
