use sea_orm::*;
use uuid::Uuid;

use crate::db::ensure_capacity;
use crate::error::ApiResult;
use crate::models::guides;
use crate::models::videos::{self, CreateVideo, UpdateVideo, VIDEO_LIMIT};

/// Videos in display order, newest first within the same `sort_order`.
pub async fn list_for_guide(
    db: &DatabaseConnection,
    guide_id: Uuid,
) -> Result<Vec<videos::Model>, DbErr> {
    videos::Entity::find()
        .filter(videos::Column::GuideId.eq(guide_id))
        .order_by_asc(videos::Column::SortOrder)
        .order_by_desc(videos::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn get_owned_video(
    db: &DatabaseConnection,
    guide_id: Uuid,
    id: Uuid,
) -> Result<Option<videos::Model>, DbErr> {
    videos::Entity::find_by_id(id)
        .filter(videos::Column::GuideId.eq(guide_id))
        .one(db)
        .await
}

/// Add a video unless the guide already has `VIDEO_LIMIT`; same locking as
/// the gallery.
pub async fn insert_video(
    db: &DatabaseConnection,
    guide_id: Uuid,
    input: CreateVideo,
) -> ApiResult<videos::Model> {
    let txn = db.begin().await?;
    guides::Entity::find_by_id(guide_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("Guide not found".to_string()))?;

    let current = videos::Entity::find()
        .filter(videos::Column::GuideId.eq(guide_id))
        .count(&txn)
        .await?;
    ensure_capacity(current, VIDEO_LIMIT, "videos")?;

    let video = videos::ActiveModel {
        id: Set(Uuid::new_v4()),
        guide_id: Set(guide_id),
        title: Set(input.title.trim().to_string()),
        youtube_url: Set(input.youtube_url.trim().to_string()),
        description: Set(input.description),
        sort_order: Set(input.sort_order),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(video)
}

pub async fn update_video(
    db: &DatabaseConnection,
    video: videos::Model,
    input: UpdateVideo,
) -> Result<videos::Model, DbErr> {
    let mut active: videos::ActiveModel = video.into();

    if let Some(title) = input.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(youtube_url) = input.youtube_url {
        active.youtube_url = Set(youtube_url.trim().to_string());
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(sort_order) = input.sort_order {
        active.sort_order = Set(sort_order);
    }

    active.update(db).await
}

pub async fn delete_video(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    videos::Entity::delete_by_id(id).exec(db).await
}
