use std::collections::HashMap;

use sea_orm::{DbBackend, QueryTrait};
use uuid::Uuid;

use totrip_backend::listing::blog::{BlogQuery, BlogSort, order, published, with_counts};
use totrip_backend::models::categories;

fn sql(query: &BlogQuery) -> String {
    query.select().build(DbBackend::Postgres).to_string()
}

fn query(pairs: &[(&str, &str)]) -> BlogQuery {
    let mut q = BlogQuery::default();
    for (key, value) in pairs {
        let value = Some(value.to_string());
        match *key {
            "tag" => q.tag = value,
            "category" => q.category = value,
            "query" => q.query = value,
            "sort_by" => q.sort_by = value,
            "page" => q.page = value,
            other => panic!("unknown key {other}"),
        }
    }
    q
}

#[test]
fn unknown_sort_keys_mean_recent() {
    assert_eq!(BlogSort::parse(None), BlogSort::Recent);
    assert_eq!(BlogSort::parse(Some("bogus")), BlogSort::Recent);
    assert_eq!(BlogSort::parse(Some("Popular")), BlogSort::Popular);
    assert_eq!(BlogSort::parse(Some(" oldest ")), BlogSort::Oldest);
    assert_eq!(BlogSort::Popular.as_str(), "popular");
}

#[test]
fn only_published_posts_are_listed() {
    let sql = sql(&BlogQuery::default());
    assert!(sql.contains(r#""status" = 'published'"#), "{sql}");
}

#[test]
fn recent_orders_newest_first() {
    let sql = sql(&BlogQuery::default());
    assert!(
        sql.contains(r#"ORDER BY "blog_posts"."first_published_at" DESC, "blog_posts"."id" DESC"#),
        "{sql}"
    );
}

#[test]
fn oldest_orders_ascending() {
    let sql = sql(&query(&[("sort_by", "oldest")]));
    assert!(
        sql.contains(r#"ORDER BY "blog_posts"."first_published_at" ASC, "blog_posts"."id" ASC"#),
        "{sql}"
    );
}

#[test]
fn popular_orders_by_views_then_date() {
    let sql = sql(&query(&[("sort_by", "popular")]));
    assert!(
        sql.contains(
            r#"ORDER BY "blog_posts"."view_count" DESC, "blog_posts"."first_published_at" DESC"#
        ),
        "{sql}"
    );
}

#[test]
fn blank_filters_are_ignored() {
    let q = query(&[("tag", "  "), ("category", ""), ("query", " ")]);
    assert!(q.tag().is_none() && q.category().is_none() && q.search().is_none());
    assert_eq!(sql(&q), sql(&BlogQuery::default()));
}

#[test]
fn tag_and_category_filter_by_exact_name_and_slug() {
    let sql = sql(&query(&[("tag", "hiking"), ("category", "travel-tips")]));
    assert!(sql.contains(r#""blog_tags"."name" = 'hiking'"#), "{sql}");
    assert!(sql.contains(r#""blog_categories"."slug" = 'travel-tips'"#), "{sql}");
}

#[test]
fn search_matches_intro_or_body_case_insensitively() {
    let sql = sql(&query(&[("query", "Desert_Trip")]));
    assert!(sql.contains(r#"LOWER("intro")"#) || sql.contains(r#"LOWER("blog_posts"."intro")"#), "{sql}");
    assert!(sql.contains("OR"), "{sql}");
    assert!(sql.contains(r"%desert\\_trip%") || sql.contains(r"%desert\_trip%"), "{sql}");
}

#[test]
fn order_helper_applies_to_any_base() {
    let sql = order(published(), BlogSort::Oldest)
        .build(DbBackend::Postgres)
        .to_string();
    assert!(sql.contains("ASC"), "{sql}");
}

#[test]
fn category_counts_default_to_zero() {
    let travel = categories::Model {
        id: Uuid::new_v4(),
        name: "Travel Tips".to_string(),
        slug: "travel-tips".to_string(),
    };
    let food = categories::Model {
        id: Uuid::new_v4(),
        name: "Food".to_string(),
        slug: "food".to_string(),
    };
    let counts = HashMap::from([(travel.id, 4)]);

    let listed = with_counts(vec![food, travel], &counts);
    assert_eq!(listed[0].slug, "food");
    assert_eq!(listed[0].post_count, 0);
    assert_eq!(listed[1].post_count, 4);
}
