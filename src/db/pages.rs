use sea_orm::*;
use uuid::Uuid;

use crate::db::slug_for_new;
use crate::error::ApiError;
use crate::models::pages::{self, CreatePage};

pub async fn get_published_page(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<pages::Model>, DbErr> {
    pages::Entity::find()
        .filter(pages::Column::Slug.eq(slug))
        .filter(pages::Column::IsPublished.eq(true))
        .one(db)
        .await
}

pub async fn create_page(db: &DatabaseConnection, input: CreatePage) -> Result<pages::Model, ApiError> {
    let slug = slug_for_new::<pages::Entity, _>(
        db,
        pages::Column::Slug,
        input.slug.as_deref(),
        &input.title,
    )
    .await?;

    Ok(pages::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title.trim().to_string()),
        slug: Set(slug),
        body: Set(input.body),
        is_published: Set(input.is_published),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await?)
}
