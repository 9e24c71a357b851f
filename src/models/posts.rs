use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
}

/// SeaORM entity for the `blog_posts` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub post_date: Date,
    pub intro: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub author_id: Option<Uuid>,
    pub featured_image_url: Option<String>,
    pub read_time: i32,
    pub view_count: i64,
    pub status: PostStatus,
    pub first_published_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::authors::Entity",
        from = "Column::AuthorId",
        to = "super::authors::Column::Id",
        on_delete = "SetNull"
    )]
    Author,
    #[sea_orm(has_many = "super::post_tags::Entity")]
    PostTags,
    #[sea_orm(has_many = "super::post_categories::Entity")]
    PostCategories,
}

impl Related<super::authors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::post_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostTags.def()
    }
}

impl Related<super::post_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostCategories.def()
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tags::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tags::Relation::Post.def().rev())
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_categories::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_categories::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

// ── DTOs ──

/// New posts are always stored as drafts.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePost {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    /// Derived from the title when absent.
    pub slug: Option<String>,
    /// Defaults to today.
    pub post_date: Option<Date>,
    #[validate(length(min = 1, max = 250, message = "Intro must be 1-250 characters"))]
    pub intro: String,
    #[serde(default)]
    pub body: String,
    pub author_id: Option<Uuid>,
    #[validate(url(message = "Enter a valid URL"))]
    pub featured_image_url: Option<String>,
    #[validate(range(min = 1, message = "Read time must be at least one minute"))]
    pub read_time: Option<i32>,
    /// Tag names; unknown tags are created.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Category ids in display order; the first is the primary category.
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
}

/// Card representation used by listings and related posts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub post_date: Date,
    pub intro: String,
    pub featured_image_url: Option<String>,
    pub read_time: i32,
    pub view_count: i64,
    pub first_published_at: Option<DateTimeUtc>,
}

impl From<Model> for PostSummary {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            slug: m.slug,
            post_date: m.post_date,
            intro: m.intro,
            featured_image_url: m.featured_image_url,
            read_time: m.read_time,
            view_count: m.view_count,
            first_published_at: m.first_published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Model,
    pub author: Option<super::authors::Model>,
    pub tags: Vec<String>,
    pub categories: Vec<super::categories::Model>,
    pub related_posts: Vec<PostSummary>,
    pub all_categories: Vec<super::categories::Model>,
}
