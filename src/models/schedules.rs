use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// SeaORM entity for the `schedules` table (periods a guide works somewhere).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub guide_id: Uuid,
    pub location_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    pub is_available: bool,
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
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::Id",
        on_delete = "Cascade"
    )]
    Location,
}

impl Related<super::guides::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guide.def()
    }
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Still running or yet to start on `today`.
    pub fn is_upcoming(&self, today: Date) -> bool {
        self.end_date >= today
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_create_range"))]
pub struct CreateSchedule {
    #[validate(required(message = "Location is required"))]
    pub location_id: Option<Uuid>,
    #[validate(required(message = "Start date is required"))]
    pub start_date: Option<Date>,
    #[validate(required(message = "End date is required"))]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub notes: String,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSchedule {
    pub location_id: Option<Uuid>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub notes: Option<String>,
    pub is_available: Option<bool>,
}

fn validate_create_range(input: &CreateSchedule) -> Result<(), ValidationError> {
    match (input.start_date, input.end_date) {
        (Some(start), Some(end)) => check_date_range(start, end),
        _ => Ok(()),
    }
}

pub fn check_date_range(start: Date, end: Date) -> Result<(), ValidationError> {
    if start > end {
        return Err(ValidationError::new("date_range")
            .with_message("Start date must not be after the end date".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(flatten)]
    pub schedule: Model,
    pub location: Option<super::locations::Model>,
}

/// Owner view of schedules, split around today.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleBuckets {
    pub upcoming: Vec<ScheduleResponse>,
    pub past: Vec<ScheduleResponse>,
}

impl ScheduleBuckets {
    /// Upcoming ascending by start date, past most recent first.
    pub fn split(schedules: Vec<ScheduleResponse>, today: Date) -> Self {
        let (mut upcoming, mut past): (Vec<_>, Vec<_>) = schedules
            .into_iter()
            .partition(|s| s.schedule.is_upcoming(today));
        upcoming.sort_by_key(|s| s.schedule.start_date);
        past.sort_by(|a, b| b.schedule.start_date.cmp(&a.schedule.start_date));
        Self { upcoming, past }
    }
}
