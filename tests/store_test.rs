//! Store operations run against SeaORM's mock connection: each test queues
//! the rows Postgres would return and then inspects the statements that were
//! issued.

use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use totrip_backend::db::{
    blog as blog_db, gallery as gallery_db, guides as guide_db, vocab as vocab_db,
};
use totrip_backend::error::ApiError;
use totrip_backend::listing::blog::BlogQuery;
use totrip_backend::models::gallery::{self, CreateGalleryItem};
use totrip_backend::models::guides::{self, GuideCard, GuideDetail};
use totrip_backend::models::posts::{self, PostStatus};
use totrip_backend::models::{categories, specialties};

fn mock() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::from(n))])
}

fn no_rows() -> Vec<BTreeMap<&'static str, Value>> {
    Vec::new()
}

/// Every statement the connection saw, with parameters inlined.
fn statements(db: DatabaseConnection) -> Vec<String> {
    db.into_transaction_log()
        .iter()
        .flat_map(|t| t.statements().iter().map(|s| s.to_string()).collect::<Vec<_>>())
        .collect()
}

fn guide() -> guides::Model {
    guides::Model {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        slug: "sara-riyadh".to_string(),
        bio: String::new(),
        phone_number: String::new(),
        profile_image_url: None,
        banner_image_url: None,
        years_of_experience: 4,
        website: None,
        twitter: None,
        instagram: None,
        facebook: None,
        linkedin: None,
        youtube: None,
        is_active: true,
        is_verified: false,
        is_featured: false,
        is_recommended: false,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn image(guide_id: Uuid) -> gallery::Model {
    gallery::Model {
        id: Uuid::new_v4(),
        guide_id,
        image_url: "https://cdn.example.com/old-town.jpg".to_string(),
        title: "Old town".to_string(),
        description: String::new(),
        sort_order: 0,
        created_at: Utc::now(),
    }
}

fn new_image() -> CreateGalleryItem {
    CreateGalleryItem {
        image_url: "https://cdn.example.com/old-town.jpg".to_string(),
        title: "Old town".to_string(),
        description: String::new(),
        sort_order: 0,
    }
}

fn post(slug: &str) -> posts::Model {
    posts::Model {
        id: Uuid::new_v4(),
        title: slug.to_string(),
        slug: slug.to_string(),
        post_date: Utc::now().date_naive(),
        intro: String::new(),
        body: String::new(),
        author_id: None,
        featured_image_url: None,
        read_time: 5,
        view_count: 0,
        status: PostStatus::Published,
        first_published_at: Some(Utc::now()),
        created_at: Utc::now(),
        updated_at: None,
    }
}

// ── Gallery ──

#[tokio::test]
async fn gallery_ties_show_newest_first() {
    let db = mock()
        .append_query_results([Vec::<gallery::Model>::new()])
        .into_connection();
    gallery_db::list_for_guide(&db, Uuid::new_v4()).await.unwrap();

    let log = statements(db);
    assert!(
        log[0].contains(r#"ORDER BY "gallery_items"."sort_order" ASC, "gallery_items"."created_at" DESC"#),
        "{}",
        log[0]
    );
}

#[tokio::test]
async fn sixth_image_is_rejected_without_insert() {
    let owner = guide();
    let db = mock()
        .append_query_results([vec![owner.clone()]])
        .append_query_results([vec![count_row(5)]])
        .into_connection();

    let err = gallery_db::insert_item(&db, owner.id, new_image())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Capacity(_)), "{err:?}");

    let log = statements(db);
    assert!(log.iter().any(|s| s.contains("FOR UPDATE")), "{log:?}");
    assert!(!log.iter().any(|s| s.contains("INSERT")), "{log:?}");
}

#[tokio::test]
async fn fifth_image_is_inserted() {
    let owner = guide();
    let stored = image(owner.id);
    let db = mock()
        .append_query_results([vec![owner.clone()]])
        .append_query_results([vec![count_row(4)]])
        .append_query_results([vec![stored.clone()]])
        .into_connection();

    let item = gallery_db::insert_item(&db, owner.id, new_image())
        .await
        .unwrap();
    assert_eq!(item, stored);

    let log = statements(db);
    assert!(log.iter().any(|s| s.contains(r#"INSERT INTO "gallery_items""#)), "{log:?}");
}

// ── Blog listing ──

fn listing_db(total: i64) -> DatabaseConnection {
    mock()
        .append_query_results([vec![count_row(total)]])
        .append_query_results([Vec::<posts::Model>::new()])
        .append_query_results([no_rows()])
        .append_query_results([Vec::<categories::Model>::new()])
        .into_connection()
}

#[tokio::test]
async fn page_beyond_the_end_lists_the_last_page() {
    let db = listing_db(20);
    let query = BlogQuery {
        page: Some("99".to_string()),
        ..Default::default()
    };

    let listing = blog_db::list_posts(&db, &query).await.unwrap();
    assert_eq!(listing.page.page, 3);
    assert_eq!(listing.page.num_pages, 3);
    assert_eq!(listing.page.total_items, 20);

    let log = statements(db);
    assert!(log[1].contains("LIMIT 9 OFFSET 18"), "{}", log[1]);
}

#[tokio::test]
async fn unreadable_page_lists_the_first_page() {
    let db = listing_db(20);
    let query = BlogQuery {
        page: Some("abc".to_string()),
        ..Default::default()
    };

    let listing = blog_db::list_posts(&db, &query).await.unwrap();
    assert_eq!(listing.page.page, 1);
    assert!(listing.page.has_next);
    assert!(!listing.page.has_previous);
}

// ── Related posts ──

#[tokio::test]
async fn related_posts_backfill_from_newest() {
    let anchor = post("anchor");
    let same = post("same-category");
    let newer = post("newer");
    let older = post("older");
    let oldest = post("oldest");

    let db = mock()
        .append_query_results([vec![same.clone()]])
        .append_query_results([vec![same.clone(), newer.clone(), older.clone(), oldest]])
        .into_connection();

    let related = blog_db::related_posts(&db, &anchor, Some(Uuid::new_v4()))
        .await
        .unwrap();
    let slugs: Vec<&str> = related.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["same-category", "newer", "older"]);

    let log = statements(db);
    assert!(log[0].contains("LIMIT 3"), "{}", log[0]);
    // Room for a full backfill even when every same-category post repeats.
    assert!(log[1].contains("LIMIT 6"), "{}", log[1]);
}

#[tokio::test]
async fn uncategorised_post_uses_newest_only() {
    let anchor = post("anchor");
    let db = mock()
        .append_query_results([vec![post("a"), post("b")]])
        .into_connection();

    let related = blog_db::related_posts(&db, &anchor, None).await.unwrap();
    assert_eq!(related.len(), 2);
    assert_eq!(statements(db).len(), 1);
}

// ── Vocabularies ──

fn specialty(name: &str) -> specialties::Model {
    specialties::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
    }
}

#[tokio::test]
async fn existing_specialty_is_not_created_again() {
    let existing = specialty("Desert safari");
    let db = mock()
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .append_query_results([vec![existing.clone()]])
        .into_connection();

    let entry = vocab_db::get_or_create_specialty(&db, "Desert safari")
        .await
        .unwrap();
    assert_eq!(entry.id, existing.id);
    assert!(!entry.created);

    let log = statements(db);
    assert!(log[0].contains("ON CONFLICT"), "{}", log[0]);
}

#[tokio::test]
async fn new_specialty_reports_created() {
    let fresh = specialty("Diving");
    let db = mock()
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![fresh.clone()]])
        .into_connection();

    let entry = vocab_db::get_or_create_specialty(&db, "Diving").await.unwrap();
    assert_eq!(entry.name, "Diving");
    assert!(entry.created);
}

// ── Guides ──

#[tokio::test]
async fn similar_candidates_load_in_a_stable_order() {
    let anchor = guide();
    let specialty_row = BTreeMap::from([
        ("guide_id", Value::from(anchor.id)),
        ("specialty_id", Value::from(Uuid::new_v4())),
    ]);
    let db = mock()
        .append_query_results([vec![specialty_row]])
        .append_query_results([no_rows()])
        .append_query_results([no_rows()])
        .append_query_results([Vec::<guides::Model>::new()])
        .into_connection();

    let similar = guide_db::similar_guides(&db, &anchor).await.unwrap();
    assert!(similar.is_empty());

    let log = statements(db);
    let candidates = log
        .iter()
        .find(|s| s.starts_with(r#"SELECT "guides"."#))
        .expect("candidate query");
    assert!(
        candidates.contains(r#"ORDER BY "guides"."created_at" ASC"#),
        "{candidates}"
    );
}

#[test]
fn cached_detail_leaves_out_per_request_fields() {
    let detail = GuideDetail {
        guide: guide(),
        name: "Sara".to_string(),
        languages: Vec::new(),
        specialties: Vec::new(),
        certifications: Vec::new(),
        packages: Vec::new(),
        gallery: Vec::new(),
        videos: Vec::new(),
        reviews: Vec::new(),
        avg_rating: 0.0,
        review_count: 0,
        schedules: Vec::new(),
        badges: Vec::new(),
        similar_guides: Vec::<GuideCard>::new(),
        is_owner: false,
    };
    let mut cached = serde_json::to_value(&detail).unwrap();
    let fields = cached.as_object_mut().unwrap();
    fields.remove("similar_guides");
    fields.remove("is_owner");

    let restored: GuideDetail = serde_json::from_value(cached).unwrap();
    assert_eq!(restored.guide, detail.guide);
    assert!(restored.similar_guides.is_empty());
    assert!(!restored.is_owner);
}
