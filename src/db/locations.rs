use sea_orm::*;
use uuid::Uuid;

use crate::models::locations::{self, CreateLocation};

pub const DEFAULT_COUNTRY: &str = "Saudi Arabia";

/// All locations, popular ones first, then by name.
pub async fn get_all_locations(db: &DatabaseConnection) -> Result<Vec<locations::Model>, DbErr> {
    locations::Entity::find()
        .order_by_desc(locations::Column::IsPopular)
        .order_by_asc(locations::Column::Name)
        .all(db)
        .await
}

pub async fn get_location_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<locations::Model>, DbErr> {
    locations::Entity::find_by_id(id).one(db).await
}

pub async fn get_location_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<locations::Model>, DbErr> {
    locations::Entity::find()
        .filter(locations::Column::Name.eq(name))
        .one(db)
        .await
}

/// Locations for `ids`; the caller compares lengths to detect unknown ids.
pub async fn get_locations_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: &[Uuid],
) -> Result<Vec<locations::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    locations::Entity::find()
        .filter(locations::Column::Id.is_in(ids.to_vec()))
        .order_by_asc(locations::Column::Name)
        .all(db)
        .await
}

pub async fn insert_location(
    db: &DatabaseConnection,
    input: CreateLocation,
) -> Result<locations::Model, DbErr> {
    locations::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        city: Set(input.city.trim().to_string()),
        country: Set(input
            .country
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string())),
        description: Set(input.description.unwrap_or_default()),
        is_popular: Set(input.is_popular),
    }
    .insert(db)
    .await
}
