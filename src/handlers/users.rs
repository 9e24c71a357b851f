use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::profiles as profile_db;
use crate::error::ApiResult;
use crate::models::profiles::UpdateProfile;

/// GET /api/users/me/profile
pub async fn get_my_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let profile = profile_db::get_own_profile(db.get_ref(), &user.0).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/users/me/profile
pub async fn update_my_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateProfile>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let profile = profile_db::update_profile(db.get_ref(), &user.0, input).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// GET /api/users/{slug}/profile: public profile page.
pub async fn get_profile(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let profile = profile_db::get_profile_by_slug(db.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}
