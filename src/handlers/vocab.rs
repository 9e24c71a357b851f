use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr};
use std::future::Future;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::{locations as location_db, vocab as vocab_db};
use crate::db::vocab::VocabEntry;
use crate::error::ApiResult;
use crate::models::VocabularyName;

const INVALID_REQUEST: &str = "طلب غير صالح";

fn failure(error: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": false,
        "error": error.into(),
    }))
}

/// Shared body of the get-or-create helpers: always 200, the outcome is in
/// `success`.
async fn get_or_create<F, Fut>(body: &[u8], missing_name: &str, create: F) -> HttpResponse
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<VocabEntry, DbErr>>,
{
    let Ok(input) = serde_json::from_slice::<VocabularyName>(body) else {
        return failure(INVALID_REQUEST);
    };
    let name = input.name.unwrap_or_default().trim().to_string();
    if name.is_empty() {
        return failure(missing_name);
    }

    match create(name).await {
        Ok(entry) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "id": entry.id,
            "name": entry.name,
            "created": entry.created,
        })),
        Err(e) => {
            tracing::error!(error = %e, "vocabulary get-or-create failed");
            failure(e.to_string())
        }
    }
}

/// POST /api/specialties/add
pub async fn add_specialty(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Bytes,
) -> HttpResponse {
    get_or_create(&body, "اسم التخصص مطلوب", |name| async move {
        vocab_db::get_or_create_specialty(db.get_ref(), &name).await
    })
    .await
}

/// POST /api/languages/add
pub async fn add_language(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Bytes,
) -> HttpResponse {
    get_or_create(&body, "اسم اللغة مطلوب", |name| async move {
        vocab_db::get_or_create_language(db.get_ref(), &name, "").await
    })
    .await
}

/// POST /api/certifications/add
pub async fn add_certification(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Bytes,
) -> HttpResponse {
    get_or_create(&body, "اسم الشهادة مطلوب", |name| async move {
        vocab_db::get_or_create_certification(db.get_ref(), &name).await
    })
    .await
}

/// GET /api/locations
pub async fn list_locations(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    let locations = location_db::get_all_locations(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(locations))
}

/// GET /api/specialties
pub async fn list_specialties(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    let specialties = vocab_db::get_all_specialties(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(specialties))
}

/// GET /api/languages
pub async fn list_languages(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    let languages = vocab_db::get_all_languages(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(languages))
}

/// GET /api/certifications
pub async fn list_certifications(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    let certifications = vocab_db::get_all_certifications(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(certifications))
}
