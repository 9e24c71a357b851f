use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::authorization::require_guide;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::GuideCache;
use crate::db::packages as package_db;
use crate::error::{ApiError, ApiResult};
use crate::models::packages::{CreatePackage, UpdatePackage};

/// GET /api/guide/packages: all of the caller's packages, inactive included.
pub async fn list_packages(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let guide = require_guide(db.get_ref(), &user.0).await?;
    let packages = package_db::list_for_guide(db.get_ref(), guide.id).await?;
    Ok(HttpResponse::Ok().json(packages))
}

/// POST /api/guide/packages
pub async fn create_package(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    body: web::Json<CreatePackage>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let guide = require_guide(db.get_ref(), &user.0).await?;
    let package = package_db::insert_package(db.get_ref(), guide.id, input).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::Created().json(package))
}

/// GET /api/guide/packages/{slug}
pub async fn get_package(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let guide = require_guide(db.get_ref(), &user.0).await?;
    let package = package_db::get_owned_package(db.get_ref(), guide.id, &path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Package not found"))?;
    let mut response = package_db::with_locations(db.get_ref(), vec![package]).await?;
    let package = response
        .pop()
        .ok_or_else(|| ApiError::not_found("Package not found"))?;
    Ok(HttpResponse::Ok().json(package))
}

/// PUT /api/guide/packages/{slug}
pub async fn update_package(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<String>,
    body: web::Json<UpdatePackage>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let guide = require_guide(db.get_ref(), &user.0).await?;
    let package = package_db::get_owned_package(db.get_ref(), guide.id, &path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Package not found"))?;

    let package = package_db::update_package(db.get_ref(), package, input).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::Ok().json(package))
}

/// DELETE /api/guide/packages/{slug}
pub async fn delete_package(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let guide = require_guide(db.get_ref(), &user.0).await?;
    let package = package_db::get_owned_package(db.get_ref(), guide.id, &path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Package not found"))?;

    package_db::delete_package(db.get_ref(), package.id).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::NoContent().finish())
}
