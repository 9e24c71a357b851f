use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::*;
use uuid::Uuid;

use crate::db::locations as location_db;
use crate::error::{ApiError, ApiResult};
use crate::models::schedules::{
    self, CreateSchedule, ScheduleBuckets, ScheduleResponse, UpdateSchedule, check_date_range,
};
use crate::models::locations;

async fn with_location<C: ConnectionTrait>(
    db: &C,
    schedules: Vec<schedules::Model>,
) -> Result<Vec<ScheduleResponse>, DbErr> {
    let mut ids: Vec<Uuid> = schedules.iter().map(|s| s.location_id).collect();
    ids.sort();
    ids.dedup();
    let by_id: HashMap<Uuid, locations::Model> = location_db::get_locations_by_ids(db, &ids)
        .await?
        .into_iter()
        .map(|l| (l.id, l))
        .collect();

    Ok(schedules
        .into_iter()
        .map(|schedule| ScheduleResponse {
            location: by_id.get(&schedule.location_id).cloned(),
            schedule,
        })
        .collect())
}

/// Schedules that have not ended by `today`, soonest first.
pub async fn upcoming_for_guide(
    db: &DatabaseConnection,
    guide_id: Uuid,
    today: NaiveDate,
) -> Result<Vec<ScheduleResponse>, DbErr> {
    let rows = schedules::Entity::find()
        .filter(schedules::Column::GuideId.eq(guide_id))
        .filter(schedules::Column::EndDate.gte(today))
        .order_by_asc(schedules::Column::StartDate)
        .all(db)
        .await?;
    with_location(db, rows).await
}

pub async fn list_for_guide(
    db: &DatabaseConnection,
    guide_id: Uuid,
    today: NaiveDate,
) -> Result<ScheduleBuckets, DbErr> {
    let rows = schedules::Entity::find()
        .filter(schedules::Column::GuideId.eq(guide_id))
        .all(db)
        .await?;
    Ok(ScheduleBuckets::split(with_location(db, rows).await?, today))
}

pub async fn get_owned_schedule(
    db: &DatabaseConnection,
    guide_id: Uuid,
    id: Uuid,
) -> Result<Option<schedules::Model>, DbErr> {
    schedules::Entity::find_by_id(id)
        .filter(schedules::Column::GuideId.eq(guide_id))
        .one(db)
        .await
}

async fn ensure_location(db: &DatabaseConnection, id: Uuid) -> ApiResult<()> {
    if location_db::get_location_by_id(db, id).await?.is_none() {
        return Err(ApiError::invalid("location_id", "Unknown location"));
    }
    Ok(())
}

fn range_error(e: validator::ValidationError) -> ApiError {
    ApiError::invalid(
        "end_date",
        e.message.map(|m| m.to_string()).unwrap_or_default(),
    )
}

/// Expects an input that already passed `validate()`, so the required
/// fields are present.
pub async fn insert_schedule(
    db: &DatabaseConnection,
    guide_id: Uuid,
    input: CreateSchedule,
) -> ApiResult<ScheduleResponse> {
    let (Some(location_id), Some(start_date), Some(end_date)) =
        (input.location_id, input.start_date, input.end_date)
    else {
        return Err(ApiError::invalid("location_id", "Location and dates are required"));
    };
    check_date_range(start_date, end_date).map_err(range_error)?;
    ensure_location(db, location_id).await?;

    let schedule = schedules::ActiveModel {
        id: Set(Uuid::new_v4()),
        guide_id: Set(guide_id),
        location_id: Set(location_id),
        start_date: Set(start_date),
        end_date: Set(end_date),
        notes: Set(input.notes),
        is_available: Set(input.is_available.unwrap_or(true)),
    }
    .insert(db)
    .await?;

    let mut response = with_location(db, vec![schedule]).await?;
    response
        .pop()
        .ok_or_else(|| ApiError::not_found("Schedule not found"))
}

/// The date range is checked on the merged values, so moving only the start
/// past the stored end is rejected.
pub async fn update_schedule(
    db: &DatabaseConnection,
    schedule: schedules::Model,
    input: UpdateSchedule,
) -> ApiResult<ScheduleResponse> {
    let start_date = input.start_date.unwrap_or(schedule.start_date);
    let end_date = input.end_date.unwrap_or(schedule.end_date);
    check_date_range(start_date, end_date).map_err(range_error)?;
    if let Some(location_id) = input.location_id {
        ensure_location(db, location_id).await?;
    }

    let mut active: schedules::ActiveModel = schedule.into();
    active.start_date = Set(start_date);
    active.end_date = Set(end_date);
    if let Some(location_id) = input.location_id {
        active.location_id = Set(location_id);
    }
    if let Some(notes) = input.notes {
        active.notes = Set(notes);
    }
    if let Some(is_available) = input.is_available {
        active.is_available = Set(is_available);
    }
    let schedule = active.update(db).await?;

    let mut response = with_location(db, vec![schedule]).await?;
    response
        .pop()
        .ok_or_else(|| ApiError::not_found("Schedule not found"))
}

pub async fn delete_schedule(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    schedules::Entity::delete_by_id(id).exec(db).await
}

/// Ids of guides with an available schedule covering `today`, optionally at
/// one location. Used as an `IN (...)` subquery.
pub fn available_on(today: NaiveDate, location_id: Option<Uuid>) -> Select<schedules::Entity> {
    schedules::Entity::find()
        .select_only()
        .column(schedules::Column::GuideId)
        .filter(schedules::Column::IsAvailable.eq(true))
        .filter(schedules::Column::StartDate.lte(today))
        .filter(schedules::Column::EndDate.gte(today))
        .apply_if(location_id, |q, id| q.filter(schedules::Column::LocationId.eq(id)))
}
