use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::require_guide;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::GuideCache;
use crate::db::schedules as schedule_db;
use crate::error::{ApiError, ApiResult};
use crate::models::schedules::{CreateSchedule, UpdateSchedule};

/// GET /api/guide/schedules: split into `upcoming` and `past`.
pub async fn list_schedules(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let guide = require_guide(db.get_ref(), &user.0).await?;
    let today = chrono::Utc::now().date_naive();
    let buckets = schedule_db::list_for_guide(db.get_ref(), guide.id, today).await?;
    Ok(HttpResponse::Ok().json(buckets))
}

/// POST /api/guide/schedules
pub async fn create_schedule(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    body: web::Json<CreateSchedule>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let guide = require_guide(db.get_ref(), &user.0).await?;
    let schedule = schedule_db::insert_schedule(db.get_ref(), guide.id, input).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::Created().json(schedule))
}

/// PUT /api/guide/schedules/{id}
pub async fn update_schedule(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateSchedule>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let guide = require_guide(db.get_ref(), &user.0).await?;
    let schedule = schedule_db::get_owned_schedule(db.get_ref(), guide.id, path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Schedule not found"))?;

    let schedule = schedule_db::update_schedule(db.get_ref(), schedule, input).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::Ok().json(schedule))
}

/// DELETE /api/guide/schedules/{id}
pub async fn delete_schedule(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let guide = require_guide(db.get_ref(), &user.0).await?;
    let schedule = schedule_db::get_owned_schedule(db.get_ref(), guide.id, path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Schedule not found"))?;

    schedule_db::delete_schedule(db.get_ref(), schedule.id).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::NoContent().finish())
}
