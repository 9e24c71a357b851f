use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Most images a single guide may keep in the gallery.
pub const GALLERY_LIMIT: u64 = 5;

/// SeaORM entity for the `gallery_items` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gallery_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub guide_id: Uuid,
    pub image_url: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub sort_order: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guides::Entity",
        from = "Column::GuideId",
        to = "super::guides::Column::Id",
        on_delete = "Cascade"
    )]
    Guide,
}

impl Related<super::guides::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guide.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGalleryItem {
    #[validate(url(message = "Enter a valid image URL"))]
    pub image_url: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGalleryItem {
    #[validate(url(message = "Enter a valid image URL"))]
    pub image_url: Option<String>,
    #[validate(length(max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}
