use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::require_guide;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::GuideCache;
use crate::db::videos as video_db;
use crate::error::{ApiError, ApiResult};
use crate::models::CappedList;
use crate::models::videos::{CreateVideo, UpdateVideo, VIDEO_LIMIT, VideoResponse};

/// GET /api/guide/videos
pub async fn list_videos(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let guide = require_guide(db.get_ref(), &user.0).await?;
    let videos: Vec<VideoResponse> = video_db::list_for_guide(db.get_ref(), guide.id)
        .await?
        .into_iter()
        .map(VideoResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(CappedList::new(videos, VIDEO_LIMIT)))
}

/// POST /api/guide/videos: 409 once ten videos exist.
pub async fn add_video(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    body: web::Json<CreateVideo>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let guide = require_guide(db.get_ref(), &user.0).await?;
    let video = video_db::insert_video(db.get_ref(), guide.id, input).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::Created().json(VideoResponse::from(video)))
}

/// PUT /api/guide/videos/{id}
pub async fn update_video(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateVideo>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let guide = require_guide(db.get_ref(), &user.0).await?;
    let video = video_db::get_owned_video(db.get_ref(), guide.id, path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))?;

    let video = video_db::update_video(db.get_ref(), video, input).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::Ok().json(VideoResponse::from(video)))
}

/// DELETE /api/guide/videos/{id}
pub async fn delete_video(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let guide = require_guide(db.get_ref(), &user.0).await?;
    let video = video_db::get_owned_video(db.get_ref(), guide.id, path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))?;

    video_db::delete_video(db.get_ref(), video.id).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::NoContent().finish())
}
