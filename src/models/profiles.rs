use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `user_profiles` table (one row per user).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(max = 5000))]
    pub bio: Option<String>,
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone_number: Option<String>,
    #[validate(url(message = "Enter a valid URL"))]
    pub profile_image_url: Option<String>,
}

/// Profile joined with the public parts of its user.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Model,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub is_guide: bool,
}
