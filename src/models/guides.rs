use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `guides` table. One row per user who registered as
/// a tour guide; `is_active = false` hides the guide from every public view.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guides")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub phone_number: String,
    pub profile_image_url: Option<String>,
    pub banner_image_url: Option<String>,
    pub years_of_experience: i32,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub youtube: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_featured: bool,
    pub is_recommended: bool,
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
    #[sea_orm(has_many = "super::packages::Entity")]
    Packages,
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::gallery::Entity")]
    Gallery,
    #[sea_orm(has_many = "super::videos::Entity")]
    Videos,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::badge_assignments::Entity")]
    BadgeAssignments,
    #[sea_orm(has_many = "super::guide_languages::Entity")]
    GuideLanguages,
    #[sea_orm(has_many = "super::guide_specialties::Entity")]
    GuideSpecialties,
    #[sea_orm(has_many = "super::guide_certifications::Entity")]
    GuideCertifications,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::packages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Packages.def()
    }
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl Related<super::gallery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gallery.def()
    }
}

impl Related<super::videos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Videos.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::badge_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BadgeAssignments.def()
    }
}

impl Related<super::languages::Entity> for Entity {
    fn to() -> RelationDef {
        super::guide_languages::Relation::Language.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::guide_languages::Relation::Guide.def().rev())
    }
}

impl Related<super::specialties::Entity> for Entity {
    fn to() -> RelationDef {
        super::guide_specialties::Relation::Specialty.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::guide_specialties::Relation::Guide.def().rev())
    }
}

impl Related<super::certifications::Entity> for Entity {
    fn to() -> RelationDef {
        super::guide_certifications::Relation::Certification.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::guide_certifications::Relation::Guide.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterGuide {
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone_number: Option<String>,
    pub bio: Option<String>,
}

/// Owner edit of the guide profile. Absent fields are left untouched;
/// vocabulary id lists replace the whole set when present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGuideProfile {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone_number: Option<String>,
    #[validate(url(message = "Enter a valid URL"))]
    pub profile_image_url: Option<String>,
    #[validate(url(message = "Enter a valid URL"))]
    pub banner_image_url: Option<String>,
    #[validate(range(min = 0, max = 80, message = "Years of experience must be between 0 and 80"))]
    pub years_of_experience: Option<i32>,
    #[validate(url(message = "Enter a valid URL"))]
    pub website: Option<String>,
    #[validate(url(message = "Enter a valid URL"))]
    pub twitter: Option<String>,
    #[validate(url(message = "Enter a valid URL"))]
    pub instagram: Option<String>,
    #[validate(url(message = "Enter a valid URL"))]
    pub facebook: Option<String>,
    #[validate(url(message = "Enter a valid URL"))]
    pub linkedin: Option<String>,
    #[validate(url(message = "Enter a valid URL"))]
    pub youtube: Option<String>,
    pub language_ids: Option<Vec<Uuid>>,
    pub specialty_ids: Option<Vec<Uuid>>,
    pub certification_ids: Option<Vec<Uuid>>,
}

/// Admin-controlled flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGuideFlags {
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_recommended: Option<bool>,
}

/// One entry in the directory or in a "similar guides" list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideCard {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub bio: String,
    pub profile_image_url: Option<String>,
    pub years_of_experience: i32,
    pub is_verified: bool,
    pub is_featured: bool,
    pub is_recommended: bool,
    pub avg_rating: f64,
    pub review_count: u64,
}

/// Everything the public guide page shows. `similar_guides` and `is_owner`
/// depend on other guides or on the viewer, so they are filled per request
/// and never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideDetail {
    #[serde(flatten)]
    pub guide: Model,
    pub name: String,
    pub languages: Vec<super::languages::Model>,
    pub specialties: Vec<super::specialties::Model>,
    pub certifications: Vec<super::certifications::Model>,
    pub packages: Vec<super::packages::PackageResponse>,
    pub gallery: Vec<super::gallery::Model>,
    pub videos: Vec<super::videos::VideoResponse>,
    pub reviews: Vec<super::reviews::PublicReview>,
    pub avg_rating: f64,
    pub review_count: u64,
    pub schedules: Vec<super::schedules::ScheduleResponse>,
    pub badges: Vec<super::badges::AssignedBadge>,
    #[serde(default)]
    pub similar_guides: Vec<GuideCard>,
    #[serde(default)]
    pub is_owner: bool,
}

impl GuideCard {
    pub fn new(guide: &Model, name: String, review_count: u64, avg_rating: f64) -> Self {
        Self {
            id: guide.id,
            slug: guide.slug.clone(),
            name,
            bio: guide.bio.clone(),
            profile_image_url: guide.profile_image_url.clone(),
            years_of_experience: guide.years_of_experience,
            is_verified: guide.is_verified,
            is_featured: guide.is_featured,
            is_recommended: guide.is_recommended,
            avg_rating,
            review_count,
        }
    }
}

/// The owner's editable profile with the vocabulary sets it references.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerProfile {
    #[serde(flatten)]
    pub guide: Model,
    pub name: String,
    pub languages: Vec<super::languages::Model>,
    pub specialties: Vec<super::specialties::Model>,
    pub certifications: Vec<super::certifications::Model>,
}

/// Owner dashboard. Reviews include unapproved ones (with email) so the
/// guide can moderate; the rating figures count approved reviews only.
#[derive(Debug, Clone, Serialize)]
pub struct GuideDashboard {
    pub guide: Model,
    pub packages: Vec<super::packages::PackageResponse>,
    pub schedules: Vec<super::schedules::ScheduleResponse>,
    pub gallery_count: u64,
    pub gallery_limit: u64,
    pub videos: Vec<super::videos::VideoResponse>,
    pub videos_count: u64,
    pub video_limit: u64,
    pub reviews: Vec<super::reviews::Model>,
    pub avg_rating: f64,
    pub review_count: u64,
    pub pending_review_count: u64,
}
