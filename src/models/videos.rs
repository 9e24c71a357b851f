use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::youtube::{self, VideoLinks};

/// Most videos a single guide may keep.
pub const VIDEO_LIMIT: u64 = 10;

/// SeaORM entity for the `videos` table (YouTube links on a guide profile).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub guide_id: Uuid,
    pub title: String,
    pub youtube_url: String,
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
pub struct CreateVideo {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "validate_youtube_url"))]
    pub youtube_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVideo {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_youtube_url"))]
    pub youtube_url: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

pub fn validate_youtube_url(url: &str) -> Result<(), ValidationError> {
    if youtube::video_id(url).is_none() {
        return Err(ValidationError::new("youtube_url")
            .with_message("Enter a valid YouTube video URL".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResponse {
    #[serde(flatten)]
    pub video: Model,
    pub youtube_id: Option<String>,
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl From<Model> for VideoResponse {
    fn from(video: Model) -> Self {
        let links = VideoLinks::from_url(&video.youtube_url);
        Self {
            youtube_id: links.as_ref().map(|l| l.youtube_id.clone()),
            embed_url: links.as_ref().map(|l| l.embed_url.clone()),
            thumbnail_url: links.map(|l| l.thumbnail_url),
            video,
        }
    }
}
