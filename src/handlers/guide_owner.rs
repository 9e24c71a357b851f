use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::authorization::require_guide;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::GuideCache;
use crate::db::guides as guide_db;
use crate::error::ApiResult;
use crate::models::guides::UpdateGuideProfile;

/// GET /api/guide/profile: the caller's own guide profile.
pub async fn get_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let guide = require_guide(db.get_ref(), &user.0).await?;
    let profile = guide_db::owner_profile(db.get_ref(), guide).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/guide/profile
pub async fn update_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    body: web::Json<UpdateGuideProfile>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let guide = require_guide(db.get_ref(), &user.0).await?;
    let guide = guide_db::update_guide_profile(db.get_ref(), guide, &user.0, input).await?;
    cache.invalidate(&guide.slug).await;

    let profile = guide_db::owner_profile(db.get_ref(), guide).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// GET /api/guide/dashboard
pub async fn dashboard(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let guide = require_guide(db.get_ref(), &user.0).await?;
    let dashboard = guide_db::dashboard(db.get_ref(), guide).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}
