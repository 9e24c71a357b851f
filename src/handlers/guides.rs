use actix_web::{HttpResponse, http::header, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::{AuthenticatedUser, OptionalUser};
use crate::cache::GuideCache;
use crate::db::{guides as guide_db, reviews as review_db};
use crate::error::{ApiError, ApiResult};
use crate::listing::directory::{DirectoryQuery, ReviewStats};
use crate::models::guides::{self, GuideDetail, RegisterGuide};
use crate::models::reviews::{PublicReview, SubmitReview};

const REVIEW_THANKS: &str = "Thank you for your review! It will be visible after approval.";

#[derive(Debug, Deserialize)]
pub struct AvailableQuery {
    pub location: Option<String>,
}

async fn active_guide(db: &DatabaseConnection, slug: &str) -> ApiResult<guides::Model> {
    guide_db::get_active_guide_by_slug(db, slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Guide not found"))
}

/// GET /api/guides: directory of active guides, twelve per page.
pub async fn list_guides(
    db: web::Data<DatabaseConnection>,
    query: web::Query<DirectoryQuery>,
) -> ApiResult<HttpResponse> {
    let page = guide_db::directory(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/guides/available: guides working today, optionally at `location`.
pub async fn available_guides(
    db: web::Data<DatabaseConnection>,
    query: web::Query<AvailableQuery>,
) -> ApiResult<HttpResponse> {
    let location = query
        .location
        .as_deref()
        .and_then(|s| Uuid::parse_str(s.trim()).ok());
    let today = chrono::Utc::now().date_naive();

    let guides = guide_db::available_guides(db.get_ref(), location, today).await?;
    Ok(HttpResponse::Ok().json(guides))
}

/// POST /api/guides/register: make the caller a guide.
pub async fn register(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<RegisterGuide>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let guide = guide_db::register_guide(db.get_ref(), &user.0, input).await?;
    Ok(HttpResponse::Created().json(guide))
}

/// GET /api/guides/{slug}: public profile. Served from the cache when
/// possible; similar guides and `is_owner` are computed per request.
pub async fn get_guide(
    viewer: OptionalUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug = path.into_inner();

    let mut detail = match cache.get::<GuideDetail>(&slug).await {
        Some(hit) => hit,
        None => {
            let guide = active_guide(db.get_ref(), &slug).await?;
            let detail = guide_db::guide_detail(db.get_ref(), guide).await?;
            cache.put(&slug, &detail).await;
            detail
        }
    };

    detail.similar_guides = guide_db::similar_guides(db.get_ref(), &detail.guide).await?;
    detail.is_owner = viewer
        .0
        .is_some_and(|user| user.id == detail.guide.user_id);
    Ok(HttpResponse::Ok().json(detail))
}

/// GET /api/guides/{slug}/reviews: approved reviews, newest first.
pub async fn list_reviews(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let guide = active_guide(db.get_ref(), &path.into_inner()).await?;
    let reviews = review_db::approved_for_guide(db.get_ref(), guide.id).await?;
    let stats = ReviewStats::from_ratings(reviews.iter().map(|r| r.rating));

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "guide": { "id": guide.id, "slug": guide.slug },
        "reviews": reviews.into_iter().map(PublicReview::from).collect::<Vec<_>>(),
        "avg_rating": stats.rounded_average(),
        "review_count": stats.count,
    })))
}

/// GET /api/guides/{slug}/similar
pub async fn similar_guides(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let guide = active_guide(db.get_ref(), &path.into_inner()).await?;
    let similar = guide_db::similar_guides(db.get_ref(), &guide).await?;
    Ok(HttpResponse::Ok().json(similar))
}

/// POST /api/guides/{slug}/review: public review form (JSON or
/// urlencoded). Always answers 303 back to the guide, with the outcome in
/// the body.
pub async fn submit_review(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
    body: web::Either<web::Json<SubmitReview>, web::Form<SubmitReview>>,
) -> ApiResult<HttpResponse> {
    let guide = active_guide(db.get_ref(), &path.into_inner()).await?;
    let submission = match body {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    };

    let (success, message) = match submission.clean() {
        Ok(review) => {
            let review = review_db::insert_review(db.get_ref(), guide.id, review).await?;
            tracing::info!(guide_id = %guide.id, review_id = %review.id, "review submitted");
            (true, REVIEW_THANKS)
        }
        Err(message) => (false, message),
    };

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/api/guides/{}", guide.slug)))
        .json(serde_json::json!({
            "success": success,
            "message": message,
        })))
}
