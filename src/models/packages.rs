use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// SeaORM entity for the `packages` table (tour packages sold by a guide).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "packages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub guide_id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub duration: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "Double", nullable)]
    pub discount_price: Option<f64>,
    #[sea_orm(column_type = "Text")]
    pub included_services: String,
    #[sea_orm(column_type = "Text")]
    pub excluded_services: String,
    pub max_people: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
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
    #[sea_orm(has_many = "super::package_locations::Entity")]
    PackageLocations,
}

impl Related<super::guides::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guide.def()
    }
}

impl Related<super::package_locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PackageLocations.def()
    }
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        super::package_locations::Relation::Location.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::package_locations::Relation::Package.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_create_pricing", skip_on_field_errors = false))]
pub struct CreatePackage {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    pub slug: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, max = 100, message = "Duration is required"))]
    pub duration: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "Discount price cannot be negative"))]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub included_services: String,
    #[serde(default)]
    pub excluded_services: String,
    #[validate(range(min = 1, message = "At least one person must fit"))]
    pub max_people: Option<i32>,
    #[validate(length(min = 1, message = "Choose at least one location"))]
    pub location_ids: Vec<Uuid>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePackage {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Duration is required"))]
    pub duration: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    /// `Some(None)` clears the discount.
    #[serde(default, deserialize_with = "super::double_option")]
    pub discount_price: Option<Option<f64>>,
    pub included_services: Option<String>,
    pub excluded_services: Option<String>,
    #[validate(range(min = 1, message = "At least one person must fit"))]
    pub max_people: Option<i32>,
    #[validate(length(min = 1, message = "Choose at least one location"))]
    pub location_ids: Option<Vec<Uuid>>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

fn validate_create_pricing(input: &CreatePackage) -> Result<(), ValidationError> {
    check_discount(input.price, input.discount_price)
}

/// A discount must not exceed the regular price.
pub fn check_discount(price: f64, discount: Option<f64>) -> Result<(), ValidationError> {
    match discount {
        Some(d) if d > price => Err(ValidationError::new("discount_above_price")
            .with_message("Discount price cannot exceed the price".into())),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageResponse {
    #[serde(flatten)]
    pub package: Model,
    pub locations: Vec<super::locations::Model>,
}
