use sea_orm::*;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::badges::{self, AssignedBadge, CreateBadge};
use crate::models::badge_assignments;

pub async fn get_all_badges(db: &DatabaseConnection) -> Result<Vec<badges::Model>, DbErr> {
    badges::Entity::find()
        .order_by_asc(badges::Column::Name)
        .all(db)
        .await
}

/// Badges of a guide, most recently assigned first.
pub async fn for_guide(db: &DatabaseConnection, guide_id: Uuid) -> Result<Vec<AssignedBadge>, DbErr> {
    Ok(badge_assignments::Entity::find()
        .filter(badge_assignments::Column::GuideId.eq(guide_id))
        .order_by_desc(badge_assignments::Column::AssignedAt)
        .find_also_related(badges::Entity)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(assignment, badge)| {
            badge.map(|badge| AssignedBadge {
                badge,
                assigned_at: assignment.assigned_at,
            })
        })
        .collect())
}

pub async fn create_badge(db: &DatabaseConnection, input: CreateBadge) -> Result<badges::Model, DbErr> {
    badges::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        description: Set(input.description),
        icon: Set(input.icon),
        color: Set(input.color),
    }
    .insert(db)
    .await
}

/// Assign `badge_id` to a guide once. A second assignment is a conflict;
/// the unique index backs this up under concurrency.
pub async fn assign_badge(
    db: &DatabaseConnection,
    guide_id: Uuid,
    badge_id: Uuid,
    assigned_by: Uuid,
) -> ApiResult<AssignedBadge> {
    let badge = badges::Entity::find_by_id(badge_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Badge not found"))?;

    let existing = badge_assignments::Entity::find()
        .filter(badge_assignments::Column::GuideId.eq(guide_id))
        .filter(badge_assignments::Column::BadgeId.eq(badge_id))
        .count(db)
        .await?;
    if existing > 0 {
        return Err(ApiError::Conflict("Badge already assigned to this guide".to_string()));
    }

    let assignment = badge_assignments::ActiveModel {
        id: Set(Uuid::new_v4()),
        guide_id: Set(guide_id),
        badge_id: Set(badge_id),
        assigned_by: Set(Some(assigned_by)),
        assigned_at: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ApiError::Conflict("Badge already assigned to this guide".to_string())
        }
        _ => ApiError::Database(e),
    })?;

    Ok(AssignedBadge {
        badge,
        assigned_at: assignment.assigned_at,
    })
}

/// Returns whether an assignment existed.
pub async fn revoke_badge(
    db: &DatabaseConnection,
    guide_id: Uuid,
    badge_id: Uuid,
) -> Result<bool, DbErr> {
    let result = badge_assignments::Entity::delete_many()
        .filter(badge_assignments::Column::GuideId.eq(guide_id))
        .filter(badge_assignments::Column::BadgeId.eq(badge_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
