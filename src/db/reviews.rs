use std::collections::HashMap;

use sea_orm::*;
use uuid::Uuid;

use crate::listing::directory::{ReviewStats, stats_by_guide};
use crate::models::reviews::{self, NewReview};

/// Approved reviews, newest first.
pub async fn approved_for_guide(
    db: &DatabaseConnection,
    guide_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::GuideId.eq(guide_id))
        .filter(reviews::Column::IsApproved.eq(true))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}

/// Every review including pending ones, for moderation.
pub async fn all_for_guide(
    db: &DatabaseConnection,
    guide_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::GuideId.eq(guide_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}

/// Approved-review stats for each of `guide_ids`. Guides without approved
/// reviews are absent from the map.
pub async fn approved_stats(
    db: &DatabaseConnection,
    guide_ids: &[Uuid],
) -> Result<HashMap<Uuid, ReviewStats>, DbErr> {
    if guide_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(Uuid, i32)> = reviews::Entity::find()
        .select_only()
        .column(reviews::Column::GuideId)
        .column(reviews::Column::Rating)
        .filter(reviews::Column::GuideId.is_in(guide_ids.to_vec()))
        .filter(reviews::Column::IsApproved.eq(true))
        .into_tuple()
        .all(db)
        .await?;
    Ok(stats_by_guide(rows))
}

pub async fn insert_review(
    db: &DatabaseConnection,
    guide_id: Uuid,
    review: NewReview,
) -> Result<reviews::Model, DbErr> {
    reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        guide_id: Set(guide_id),
        author_name: Set(review.author_name),
        email: Set(review.email),
        rating: Set(review.rating),
        comment: Set(review.comment),
        is_approved: Set(false),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await
}

pub async fn get_review(db: &DatabaseConnection, id: Uuid) -> Result<Option<reviews::Model>, DbErr> {
    reviews::Entity::find_by_id(id).one(db).await
}

pub async fn set_approval(
    db: &DatabaseConnection,
    review: reviews::Model,
    is_approved: bool,
) -> Result<reviews::Model, DbErr> {
    let mut active: reviews::ActiveModel = review.into();
    active.is_approved = Set(is_approved);
    active.update(db).await
}
