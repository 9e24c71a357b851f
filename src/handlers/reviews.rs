use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::GuideCache;
use crate::db::{guides as guide_db, reviews as review_db};
use crate::error::{ApiError, ApiResult};
use crate::models::reviews::ReviewApproval;

/// POST /api/guide/reviews/{id}/approval: approve or hide a review. Allowed
/// for the reviewed guide and for admins; anyone else gets 404.
pub async fn set_approval(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<Uuid>,
    body: web::Json<ReviewApproval>,
) -> ApiResult<HttpResponse> {
    let review = review_db::get_review(db.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;
    let guide = guide_db::get_guide_by_id(db.get_ref(), review.guide_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;
    if guide.user_id != user.0.id && !user.0.is_admin() {
        return Err(ApiError::not_found("Review not found"));
    }

    let review = review_db::set_approval(db.get_ref(), review, body.is_approved).await?;
    cache.invalidate(&guide.slug).await;
    tracing::info!(review_id = %review.id, approved = review.is_approved, "review moderated");
    Ok(HttpResponse::Ok().json(review))
}
