//! Site administration. Every handler requires an admin; other callers get
//! 404 as if the route did not exist.

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::require_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::GuideCache;
use crate::db::{
    badges as badge_db, blog as blog_db, guides as guide_db, locations as location_db,
    pages as page_db,
};
use crate::error::{ApiError, ApiResult};
use crate::models::authors::CreateAuthor;
use crate::models::badges::{AssignBadge, CreateBadge};
use crate::models::categories::CreateCategory;
use crate::models::guides::{self, UpdateGuideFlags};
use crate::models::locations::CreateLocation;
use crate::models::pages::CreatePage;
use crate::models::posts::CreatePost;

async fn guide_by_slug(db: &DatabaseConnection, slug: &str) -> ApiResult<guides::Model> {
    guide_db::get_guide_by_slug(db, slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Guide not found"))
}

/// POST /api/admin/categories
pub async fn create_category(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateCategory>,
) -> ApiResult<HttpResponse> {
    require_admin(&user.0)?;
    let input = body.into_inner();
    input.validate()?;

    let category = blog_db::create_category(db.get_ref(), input).await?;
    Ok(HttpResponse::Created().json(category))
}

/// POST /api/admin/authors
pub async fn create_author(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateAuthor>,
) -> ApiResult<HttpResponse> {
    require_admin(&user.0)?;
    let input = body.into_inner();
    input.validate()?;

    let author = blog_db::create_author(db.get_ref(), input).await?;
    Ok(HttpResponse::Created().json(author))
}

/// POST /api/admin/posts: new posts start as drafts.
pub async fn create_post(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreatePost>,
) -> ApiResult<HttpResponse> {
    require_admin(&user.0)?;
    let input = body.into_inner();
    input.validate()?;

    let post = blog_db::create_post(db.get_ref(), input).await?;
    tracing::info!(post_id = %post.id, slug = %post.slug, "draft post created");
    Ok(HttpResponse::Created().json(post))
}

/// POST /api/admin/posts/{slug}/publish
pub async fn publish_post(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    require_admin(&user.0)?;
    let post = blog_db::publish_post(db.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/admin/pages
pub async fn create_page(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreatePage>,
) -> ApiResult<HttpResponse> {
    require_admin(&user.0)?;
    let input = body.into_inner();
    input.validate()?;

    let page = page_db::create_page(db.get_ref(), input).await?;
    Ok(HttpResponse::Created().json(page))
}

/// POST /api/admin/locations
pub async fn create_location(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateLocation>,
) -> ApiResult<HttpResponse> {
    require_admin(&user.0)?;
    let input = body.into_inner();
    input.validate()?;

    let location = location_db::insert_location(db.get_ref(), input).await?;
    Ok(HttpResponse::Created().json(location))
}

/// GET /api/admin/badges
pub async fn list_badges(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    require_admin(&user.0)?;
    let badges = badge_db::get_all_badges(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(badges))
}

/// POST /api/admin/badges
pub async fn create_badge(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateBadge>,
) -> ApiResult<HttpResponse> {
    require_admin(&user.0)?;
    let input = body.into_inner();
    input.validate()?;

    let badge = badge_db::create_badge(db.get_ref(), input).await?;
    Ok(HttpResponse::Created().json(badge))
}

/// POST /api/admin/guides/{slug}/badges: 409 if the guide already has it.
pub async fn assign_badge(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<String>,
    body: web::Json<AssignBadge>,
) -> ApiResult<HttpResponse> {
    require_admin(&user.0)?;
    let guide = guide_by_slug(db.get_ref(), &path.into_inner()).await?;

    let assigned = badge_db::assign_badge(db.get_ref(), guide.id, body.badge_id, user.0.id).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::Created().json(assigned))
}

/// DELETE /api/admin/guides/{slug}/badges/{badge_id}
pub async fn revoke_badge(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<(String, Uuid)>,
) -> ApiResult<HttpResponse> {
    require_admin(&user.0)?;
    let (slug, badge_id) = path.into_inner();
    let guide = guide_by_slug(db.get_ref(), &slug).await?;

    if !badge_db::revoke_badge(db.get_ref(), guide.id, badge_id).await? {
        return Err(ApiError::not_found("Badge assignment not found"));
    }
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/admin/guides/{slug}/flags: verified, featured, recommended, active.
pub async fn update_guide_flags(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<GuideCache>,
    path: web::Path<String>,
    body: web::Json<UpdateGuideFlags>,
) -> ApiResult<HttpResponse> {
    require_admin(&user.0)?;
    let guide = guide_by_slug(db.get_ref(), &path.into_inner()).await?;

    let guide = guide_db::update_guide_flags(db.get_ref(), guide, body.into_inner()).await?;
    cache.invalidate(&guide.slug).await;
    Ok(HttpResponse::Ok().json(guide))
}
