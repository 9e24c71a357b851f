use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::db::{blog as blog_db, pages as page_db};
use crate::error::{ApiError, ApiResult};
use crate::listing::blog::BlogQuery;

/// GET /api/blog: published posts filtered by `tag`, `category` and
/// `query`, sorted by `sort_by`, nine per page.
pub async fn list_posts(
    db: web::Data<DatabaseConnection>,
    query: web::Query<BlogQuery>,
) -> ApiResult<HttpResponse> {
    let listing = blog_db::list_posts(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// GET /api/blog/{slug}: a published post with related posts. Counts the
/// view in the background; a failed increment never fails the read.
pub async fn get_post(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug = path.into_inner();
    let post = blog_db::get_published_post(db.get_ref(), &slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let conn = db.get_ref().clone();
    let post_id = post.id;
    actix_web::rt::spawn(async move {
        if let Err(e) = blog_db::increment_view_count(&conn, post_id).await {
            tracing::warn!(error = %e, %post_id, "failed to count post view");
        }
    });

    let mut detail = blog_db::post_detail(db.get_ref(), post).await?;
    detail.post.view_count += 1;
    Ok(HttpResponse::Ok().json(detail))
}

/// GET /api/pages/{slug}
pub async fn get_page(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let page = page_db::get_published_page(db.get_ref(), &path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Page not found"))?;
    Ok(HttpResponse::Ok().json(page))
}
