use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::require_guide;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::GuideCache;
use crate::db::gallery as gallery_db;
use crate::error::{ApiError, ApiResult};
use crate::models::CappedList;
use crate::models::gallery::{CreateGalleryItem, GALLERY_LIMIT, UpdateGalleryItem};

/// GET /api/guide/gallery: newest first, with how many more fit.
pub async fn list_gallery(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let guide = require_guide(db.get_ref(), &user.0).await?;
    let items = gallery_db::list_recent_for_guide(db.get_ref(), guide.id).await?;
    Ok(HttpResponse::Ok().json(CappedList::new(items, GALLERY_LIMIT)))
}

/// POST /api/guide/gallery: 409 once the gallery is full.
pub async fn add_image(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    body: web::Json<CreateGalleryItem>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let guide = require_guide(db.get_ref(), &user.0).await?;
    let item = gallery_db::insert_item(db.get_ref(), guide.id, input).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::Created().json(item))
}

/// PUT /api/guide/gallery/{id}
pub async fn update_image(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateGalleryItem>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let guide = require_guide(db.get_ref(), &user.0).await?;
    let item = gallery_db::get_owned_item(db.get_ref(), guide.id, path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Image not found"))?;

    let item = gallery_db::update_item(db.get_ref(), item, input).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::Ok().json(item))
}

/// DELETE /api/guide/gallery/{id}
pub async fn delete_image(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let guide = require_guide(db.get_ref(), &user.0).await?;
    let item = gallery_db::get_owned_item(db.get_ref(), guide.id, path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Image not found"))?;

    gallery_db::delete_item(db.get_ref(), item.id).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::NoContent().finish())
}
