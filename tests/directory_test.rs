use std::collections::HashMap;

use sea_orm::{DbBackend, QueryTrait};
use uuid::Uuid;

use totrip_backend::listing::directory::{
    DirectoryQuery, ReviewStats, rank_directory, stats_by_guide,
};
use totrip_backend::models::guides;

fn guide(slug: &str, featured: bool, recommended: bool) -> guides::Model {
    guides::Model {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        slug: slug.to_string(),
        bio: String::new(),
        phone_number: String::new(),
        profile_image_url: None,
        banner_image_url: None,
        years_of_experience: 3,
        website: None,
        twitter: None,
        instagram: None,
        facebook: None,
        linkedin: None,
        youtube: None,
        is_active: true,
        is_verified: false,
        is_featured: featured,
        is_recommended: recommended,
        created_at: chrono::Utc::now(),
        updated_at: None,
    }
}

fn slugs(ranked: &[(guides::Model, ReviewStats)]) -> Vec<&str> {
    ranked.iter().map(|(g, _)| g.slug.as_str()).collect()
}

#[test]
fn average_counts_approved_ratings_only() {
    // Approved {5, 4}; the unapproved 1 never reaches the stats query.
    let stats = ReviewStats::from_ratings([5, 4]);
    assert_eq!(stats.count, 2);
    assert_eq!(stats.average, 4.5);
    assert_eq!(stats.rounded_average(), 4.5);
}

#[test]
fn no_reviews_average_zero() {
    let stats = ReviewStats::from_ratings(Vec::<i32>::new());
    assert_eq!(stats, ReviewStats::default());
    assert_eq!(stats.rounded_average(), 0.0);
}

#[test]
fn rounded_average_has_one_decimal() {
    assert_eq!(ReviewStats::from_ratings([5, 4, 4]).rounded_average(), 4.3);
}

#[test]
fn stats_are_grouped_per_guide() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let stats = stats_by_guide([(a, 5), (b, 2), (a, 3)]);

    assert_eq!(stats[&a].count, 2);
    assert_eq!(stats[&a].average, 4.0);
    assert_eq!(stats[&b].count, 1);
}

#[test]
fn featured_then_recommended_then_rating_then_count() {
    let plain_top_rated = guide("plain-top-rated", false, false);
    let plain_many = guide("plain-many", false, false);
    let plain_few = guide("plain-few", false, false);
    let recommended = guide("recommended", false, true);
    let featured = guide("featured", true, false);

    let stats = HashMap::from([
        (plain_top_rated.id, ReviewStats::from_ratings([5])),
        (plain_many.id, ReviewStats::from_ratings([4, 4, 4])),
        (plain_few.id, ReviewStats::from_ratings([4])),
        (recommended.id, ReviewStats::from_ratings([2])),
    ]);

    let ranked = rank_directory(
        vec![plain_few, plain_many, recommended, plain_top_rated, featured],
        &stats,
    );
    assert_eq!(
        slugs(&ranked),
        vec!["featured", "recommended", "plain-top-rated", "plain-many", "plain-few"]
    );
}

#[test]
fn ties_keep_load_order() {
    let first = guide("first", false, false);
    let second = guide("second", false, false);
    let ranked = rank_directory(vec![first, second], &HashMap::new());
    assert_eq!(slugs(&ranked), vec!["first", "second"]);
}

#[test]
fn unparseable_filter_ids_are_ignored() {
    let query = DirectoryQuery {
        location: Some("riyadh".to_string()),
        specialty: Some(String::new()),
        language: None,
        page: None,
    };
    assert!(query.location().is_none());
    assert!(query.specialty().is_none());

    let filtered = query.filtered().build(DbBackend::Postgres).to_string();
    let base = DirectoryQuery::default()
        .filtered()
        .build(DbBackend::Postgres)
        .to_string();
    assert_eq!(filtered, base);
    assert!(base.contains(r#""guides"."is_active" = TRUE"#), "{base}");
}

#[test]
fn location_filter_covers_schedules_and_packages() {
    let location = Uuid::new_v4();
    let query = DirectoryQuery {
        location: Some(location.to_string()),
        ..Default::default()
    };
    let sql = query.filtered().build(DbBackend::Postgres).to_string();

    assert!(sql.contains(r#"FROM "schedules""#), "{sql}");
    assert!(sql.contains(r#"FROM "packages""#), "{sql}");
    assert!(sql.contains(&location.to_string()), "{sql}");
}
