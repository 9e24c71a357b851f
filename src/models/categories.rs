use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `blog_categories` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_categories::Entity")]
    PostCategories,
}

impl Related<super::post_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostCategories.def()
    }
}

impl Related<super::posts::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_categories::Relation::Post.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_categories::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Derived from the name when absent.
    #[validate(length(max = 80))]
    pub slug: Option<String>,
}

/// A category with its number of published posts, for the blog sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithCount {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub post_count: u64,
}
