use actix_web::ResponseError;
use actix_web::http::StatusCode;
use chrono::NaiveDate;
use sea_orm::DbErr;
use uuid::Uuid;
use validator::Validate;

use totrip_backend::config::project_ref;
use totrip_backend::db::ensure_capacity;
use totrip_backend::error::ApiError;
use totrip_backend::models::CappedList;
use totrip_backend::models::gallery::GALLERY_LIMIT;
use totrip_backend::models::packages::{UpdatePackage, check_discount};
use totrip_backend::models::reviews::{RatingInput, SubmitReview, clamp_rating};
use totrip_backend::models::schedules::{self, CreateSchedule, ScheduleBuckets, ScheduleResponse, check_date_range};
use totrip_backend::models::videos::VIDEO_LIMIT;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

// ── Reviews ──

#[test]
fn rating_is_clamped_and_defaulted() {
    assert_eq!(clamp_rating(Some(&RatingInput::Text("9".into()))), 5);
    assert_eq!(clamp_rating(Some(&RatingInput::Text("0".into()))), 1);
    assert_eq!(clamp_rating(Some(&RatingInput::Text(" 3 ".into()))), 3);
    assert_eq!(clamp_rating(Some(&RatingInput::Text("abc".into()))), 5);
    assert_eq!(clamp_rating(Some(&RatingInput::Int(-4))), 1);
    assert_eq!(clamp_rating(Some(&RatingInput::Float(2.7))), 2);
    assert_eq!(clamp_rating(None), 5);
}

#[test]
fn review_form_accepts_string_or_number_rating() {
    let from_json: SubmitReview =
        serde_json::from_str(r#"{"author_name": "Sara", "rating": 4, "comment": "Great"}"#)
            .expect("json review");
    let review = from_json.clean().expect("complete review");
    assert_eq!(review.author_name, "Sara");
    assert_eq!(review.rating, 4);
    assert_eq!(review.email, "");

    let from_text: SubmitReview =
        serde_json::from_str(r#"{"name": "Omar", "rating": "12", "comment": " Lovely trip "}"#)
            .expect("text rating");
    let review = from_text.clean().expect("complete review");
    assert_eq!(review.rating, 5);
    assert_eq!(review.comment, "Lovely trip");
}

#[test]
fn review_needs_name_and_comment() {
    let blank_name = SubmitReview {
        name: Some("   ".into()),
        comment: Some("Nice".into()),
        ..Default::default()
    };
    assert!(blank_name.clean().is_err());

    let no_comment = SubmitReview {
        name: Some("Ali".into()),
        ..Default::default()
    };
    assert!(no_comment.clean().is_err());

    let long_name = SubmitReview {
        name: Some("x".repeat(101)),
        comment: Some("Nice".into()),
        ..Default::default()
    };
    assert!(long_name.clean().is_err());
}

// ── Packages ──

#[test]
fn discount_may_not_exceed_price() {
    assert!(check_discount(100.0, Some(80.0)).is_ok());
    assert!(check_discount(100.0, Some(100.0)).is_ok());
    assert!(check_discount(100.0, None).is_ok());
    assert!(check_discount(100.0, Some(120.0)).is_err());
}

#[test]
fn package_update_distinguishes_null_discount() {
    let absent: UpdatePackage = serde_json::from_str(r#"{"price": 50}"#).expect("update");
    assert_eq!(absent.discount_price, None);

    let cleared: UpdatePackage =
        serde_json::from_str(r#"{"discount_price": null}"#).expect("update");
    assert_eq!(cleared.discount_price, Some(None));

    let set: UpdatePackage = serde_json::from_str(r#"{"discount_price": 40.5}"#).expect("update");
    assert_eq!(set.discount_price, Some(Some(40.5)));
}

// ── Schedules ──

#[test]
fn date_range_allows_single_day() {
    assert!(check_date_range(date(2026, 3, 1), date(2026, 3, 1)).is_ok());
    assert!(check_date_range(date(2026, 3, 2), date(2026, 3, 1)).is_err());
}

#[test]
fn create_schedule_requires_fields_and_order() {
    let missing = CreateSchedule {
        location_id: None,
        start_date: Some(date(2026, 3, 1)),
        end_date: None,
        notes: String::new(),
        is_available: None,
    };
    let errors = missing.validate().unwrap_err();
    let fields = errors.field_errors();
    assert!(fields.contains_key("location_id"));
    assert!(fields.contains_key("end_date"));

    let reversed = CreateSchedule {
        location_id: Some(Uuid::new_v4()),
        start_date: Some(date(2026, 3, 10)),
        end_date: Some(date(2026, 3, 1)),
        notes: String::new(),
        is_available: None,
    };
    assert!(reversed.validate().is_err());

    let ok = CreateSchedule {
        end_date: Some(date(2026, 3, 12)),
        ..reversed
    };
    assert!(ok.validate().is_ok());
}

fn schedule(start: NaiveDate, end: NaiveDate) -> ScheduleResponse {
    ScheduleResponse {
        schedule: schedules::Model {
            id: Uuid::new_v4(),
            guide_id: Uuid::new_v4(),
            location_id: Uuid::new_v4(),
            start_date: start,
            end_date: end,
            notes: String::new(),
            is_available: true,
        },
        location: None,
    }
}

#[test]
fn schedules_split_around_today() {
    let today = date(2026, 5, 10);
    let buckets = ScheduleBuckets::split(
        vec![
            schedule(date(2026, 6, 1), date(2026, 6, 3)),
            schedule(date(2026, 4, 1), date(2026, 4, 5)),
            schedule(date(2026, 5, 8), date(2026, 5, 10)),
            schedule(date(2026, 3, 1), date(2026, 3, 2)),
        ],
        today,
    );

    let upcoming: Vec<_> = buckets.upcoming.iter().map(|s| s.schedule.start_date).collect();
    let past: Vec<_> = buckets.past.iter().map(|s| s.schedule.start_date).collect();
    // A schedule ending today still counts as upcoming.
    assert_eq!(upcoming, vec![date(2026, 5, 8), date(2026, 6, 1)]);
    assert_eq!(past, vec![date(2026, 4, 1), date(2026, 3, 1)]);
}

// ── Capacity ──

#[test]
fn capacity_blocks_at_limit() {
    assert!(ensure_capacity(4, GALLERY_LIMIT, "images").is_ok());

    let full = ensure_capacity(5, GALLERY_LIMIT, "images").unwrap_err();
    assert!(matches!(full, ApiError::Capacity(_)));
    assert_eq!(full.status_code(), StatusCode::CONFLICT);
    assert!(full.to_string().contains("5 images"));

    assert!(ensure_capacity(9, VIDEO_LIMIT, "videos").is_ok());
    assert!(ensure_capacity(10, VIDEO_LIMIT, "videos").is_err());
}

#[test]
fn capped_list_reports_remaining() {
    let list = CappedList::new(vec![1, 2, 3], GALLERY_LIMIT);
    assert_eq!(list.limit, 5);
    assert_eq!(list.remaining, 2);

    let over = CappedList::new(vec![0; 7], GALLERY_LIMIT);
    assert_eq!(over.remaining, 0);
}

// ── Errors and config ──

#[test]
fn error_status_codes() {
    assert_eq!(
        ApiError::invalid("title", "Title is required").status_code(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(ApiError::not_found("Guide not found").status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        ApiError::Conflict("Badge already assigned".into()).status_code(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        ApiError::from(DbErr::RecordNotFound("Post not found".into())).status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        ApiError::from(DbErr::Custom("boom".into())).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn validator_errors_keep_field_names() {
    let input = UpdatePackage {
        price: Some(-1.0),
        max_people: Some(0),
        ..Default::default()
    };
    let ApiError::Validation(fields) = ApiError::from(input.validate().unwrap_err()) else {
        panic!("expected a validation error");
    };
    assert_eq!(fields["price"], vec!["Price cannot be negative".to_string()]);
    assert_eq!(fields["max_people"], vec!["At least one person must fit".to_string()]);
}

#[test]
fn project_ref_from_supabase_url() {
    assert_eq!(project_ref("https://abcd1234.supabase.co").unwrap(), "abcd1234");
    assert_eq!(project_ref("https://abcd1234.supabase.co/").unwrap(), "abcd1234");
    assert!(project_ref("http://localhost:54321").is_err());
}
