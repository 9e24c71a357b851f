use std::collections::{HashMap, HashSet};

use sea_orm::*;
use uuid::Uuid;

use crate::db::{locations as location_db, slug_for_new};
use crate::error::{ApiError, ApiResult};
use crate::models::packages::{self, CreatePackage, PackageResponse, UpdatePackage, check_discount};
use crate::models::{locations, package_locations};

/// Attach each package's locations (one query for all of them).
pub async fn with_locations<C: ConnectionTrait>(
    db: &C,
    packages: Vec<packages::Model>,
) -> Result<Vec<PackageResponse>, DbErr> {
    let ids: Vec<Uuid> = packages.iter().map(|p| p.id).collect();
    let mut by_package: HashMap<Uuid, Vec<locations::Model>> = HashMap::new();
    if !ids.is_empty() {
        let rows = package_locations::Entity::find()
            .filter(package_locations::Column::PackageId.is_in(ids))
            .find_also_related(locations::Entity)
            .order_by_asc(locations::Column::Name)
            .all(db)
            .await?;
        for (link, location) in rows {
            if let Some(location) = location {
                by_package.entry(link.package_id).or_default().push(location);
            }
        }
    }

    Ok(packages
        .into_iter()
        .map(|package| PackageResponse {
            locations: by_package.remove(&package.id).unwrap_or_default(),
            package,
        })
        .collect())
}

/// Active packages shown on the public profile, featured first.
pub async fn list_active_for_guide(
    db: &DatabaseConnection,
    guide_id: Uuid,
) -> Result<Vec<PackageResponse>, DbErr> {
    let packages = packages::Entity::find()
        .filter(packages::Column::GuideId.eq(guide_id))
        .filter(packages::Column::IsActive.eq(true))
        .order_by_desc(packages::Column::IsFeatured)
        .order_by_desc(packages::Column::CreatedAt)
        .all(db)
        .await?;
    with_locations(db, packages).await
}

/// Every package of the guide, active or not.
pub async fn list_for_guide(
    db: &DatabaseConnection,
    guide_id: Uuid,
) -> Result<Vec<PackageResponse>, DbErr> {
    let packages = packages::Entity::find()
        .filter(packages::Column::GuideId.eq(guide_id))
        .order_by_desc(packages::Column::CreatedAt)
        .all(db)
        .await?;
    with_locations(db, packages).await
}

/// Package `slug` if it belongs to `guide_id`; someone else's package is
/// indistinguishable from a missing one.
pub async fn get_owned_package(
    db: &DatabaseConnection,
    guide_id: Uuid,
    slug: &str,
) -> Result<Option<packages::Model>, DbErr> {
    packages::Entity::find()
        .filter(packages::Column::Slug.eq(slug))
        .filter(packages::Column::GuideId.eq(guide_id))
        .one(db)
        .await
}

async fn ensure_locations_exist<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> ApiResult<Vec<Uuid>> {
    let mut seen = HashSet::new();
    let ids: Vec<Uuid> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
    if ids.is_empty() {
        return Err(ApiError::invalid("location_ids", "Choose at least one location"));
    }
    let found = location_db::get_locations_by_ids(db, &ids).await?;
    if found.len() != ids.len() {
        return Err(ApiError::invalid("location_ids", "Unknown location"));
    }
    Ok(ids)
}

async fn replace_locations<C: ConnectionTrait>(
    db: &C,
    package_id: Uuid,
    location_ids: &[Uuid],
) -> Result<(), DbErr> {
    package_locations::Entity::delete_many()
        .filter(package_locations::Column::PackageId.eq(package_id))
        .exec(db)
        .await?;
    package_locations::Entity::insert_many(location_ids.iter().map(|location_id| {
        package_locations::ActiveModel {
            package_id: Set(package_id),
            location_id: Set(*location_id),
        }
    }))
    .exec_without_returning(db)
    .await?;
    Ok(())
}

pub async fn insert_package(
    db: &DatabaseConnection,
    guide_id: Uuid,
    input: CreatePackage,
) -> ApiResult<PackageResponse> {
    let txn = db.begin().await?;
    let location_ids = ensure_locations_exist(&txn, &input.location_ids).await?;
    let slug = slug_for_new::<packages::Entity, _>(
        &txn,
        packages::Column::Slug,
        input.slug.as_deref(),
        &input.title,
    )
    .await?;

    let package = packages::ActiveModel {
        id: Set(Uuid::new_v4()),
        guide_id: Set(guide_id),
        title: Set(input.title.trim().to_string()),
        slug: Set(slug),
        description: Set(input.description),
        duration: Set(input.duration),
        price: Set(input.price),
        discount_price: Set(input.discount_price),
        included_services: Set(input.included_services),
        excluded_services: Set(input.excluded_services),
        max_people: Set(input.max_people.unwrap_or(1)),
        is_active: Set(input.is_active.unwrap_or(true)),
        is_featured: Set(input.is_featured.unwrap_or(false)),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(&txn)
    .await?;

    replace_locations(&txn, package.id, &location_ids).await?;
    let response = with_locations(&txn, vec![package]).await?;
    txn.commit().await?;

    response
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found("Package not found"))
}

/// Apply an owner edit. The discount is checked against the resulting price,
/// so lowering the price below an existing discount is rejected too.
pub async fn update_package(
    db: &DatabaseConnection,
    package: packages::Model,
    input: UpdatePackage,
) -> ApiResult<PackageResponse> {
    let price = input.price.unwrap_or(package.price);
    let discount = input.discount_price.unwrap_or(package.discount_price);
    check_discount(price, discount).map_err(|e| {
        ApiError::invalid(
            "discount_price",
            e.message.map(|m| m.to_string()).unwrap_or_default(),
        )
    })?;

    let txn = db.begin().await?;
    let location_ids = match &input.location_ids {
        Some(ids) => Some(ensure_locations_exist(&txn, ids).await?),
        None => None,
    };

    let mut active: packages::ActiveModel = package.into();
    if let Some(title) = input.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(duration) = input.duration {
        active.duration = Set(duration);
    }
    active.price = Set(price);
    active.discount_price = Set(discount);
    if let Some(included) = input.included_services {
        active.included_services = Set(included);
    }
    if let Some(excluded) = input.excluded_services {
        active.excluded_services = Set(excluded);
    }
    if let Some(max_people) = input.max_people {
        active.max_people = Set(max_people);
    }
    if let Some(is_active) = input.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(is_featured) = input.is_featured {
        active.is_featured = Set(is_featured);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));
    let package = active.update(&txn).await?;

    if let Some(ids) = location_ids {
        replace_locations(&txn, package.id, &ids).await?;
    }
    let response = with_locations(&txn, vec![package]).await?;
    txn.commit().await?;

    response
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found("Package not found"))
}

pub async fn delete_package(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    packages::Entity::delete_by_id(id).exec(db).await
}
