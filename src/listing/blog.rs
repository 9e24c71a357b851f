use std::collections::HashMap;

use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;
use serde::Deserialize;

use crate::models::categories::{self, CategoryWithCount};
use crate::models::posts::{self, PostStatus};
use crate::models::{post_categories, post_tags, tags};

/// Query string of `GET /api/blog`. Every field is optional and read leniently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogQuery {
    pub tag: Option<String>,
    pub category: Option<String>,
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlogSort {
    #[default]
    Recent,
    Oldest,
    Popular,
}

impl BlogSort {
    /// Unknown keys fall back to `Recent`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("oldest") => BlogSort::Oldest,
            Some("popular") => BlogSort::Popular,
            _ => BlogSort::Recent,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlogSort::Recent => "recent",
            BlogSort::Oldest => "oldest",
            BlogSort::Popular => "popular",
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// `%` and `_` in user input match literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

impl BlogQuery {
    pub fn sort(&self) -> BlogSort {
        BlogSort::parse(self.sort_by.as_deref())
    }

    pub fn tag(&self) -> Option<&str> {
        non_blank(&self.tag)
    }

    pub fn category(&self) -> Option<&str> {
        non_blank(&self.category)
    }

    pub fn search(&self) -> Option<&str> {
        non_blank(&self.query)
    }

    /// Published posts narrowed by every filter that is present. Filters are
    /// independent `IN (subquery)` / `LIKE` predicates, so their order does
    /// not matter.
    pub fn filtered(&self) -> Select<posts::Entity> {
        published()
            .apply_if(self.tag(), |q, tag| {
                q.filter(
                    posts::Column::Id.in_subquery(
                        post_tags::Entity::find()
                            .select_only()
                            .column(post_tags::Column::PostId)
                            .inner_join(tags::Entity)
                            .filter(tags::Column::Name.eq(tag))
                            .into_query(),
                    ),
                )
            })
            .apply_if(self.category(), |q, slug| {
                q.filter(
                    posts::Column::Id.in_subquery(
                        post_categories::Entity::find()
                            .select_only()
                            .column(post_categories::Column::PostId)
                            .inner_join(categories::Entity)
                            .filter(categories::Column::Slug.eq(slug))
                            .into_query(),
                    ),
                )
            })
            .apply_if(self.search(), |q, term| {
                let pattern = like_pattern(term);
                q.filter(
                    Condition::any()
                        .add(Expr::expr(Func::lower(Expr::col(posts::Column::Intro))).like(pattern.clone()))
                        .add(Expr::expr(Func::lower(Expr::col(posts::Column::Body))).like(pattern)),
                )
            })
    }

    /// Filtered and ordered; the id tie-breaker keeps pages disjoint.
    pub fn select(&self) -> Select<posts::Entity> {
        order(self.filtered(), self.sort())
    }
}

/// Every post visitors may see.
pub fn published() -> Select<posts::Entity> {
    posts::Entity::find().filter(posts::Column::Status.eq(PostStatus::Published))
}

pub fn order(query: Select<posts::Entity>, sort: BlogSort) -> Select<posts::Entity> {
    match sort {
        BlogSort::Recent => query
            .order_by_desc(posts::Column::FirstPublishedAt)
            .order_by_desc(posts::Column::Id),
        BlogSort::Oldest => query
            .order_by_asc(posts::Column::FirstPublishedAt)
            .order_by_asc(posts::Column::Id),
        BlogSort::Popular => query
            .order_by_desc(posts::Column::ViewCount)
            .order_by_desc(posts::Column::FirstPublishedAt)
            .order_by_desc(posts::Column::Id),
    }
}

/// Attach live post counts to categories (already ordered by name).
/// Categories without published posts report 0.
pub fn with_counts(
    categories: Vec<categories::Model>,
    counts: &HashMap<uuid::Uuid, u64>,
) -> Vec<CategoryWithCount> {
    categories
        .into_iter()
        .map(|c| CategoryWithCount {
            post_count: counts.get(&c.id).copied().unwrap_or(0),
            id: c.id,
            name: c.name,
            slug: c.slug,
        })
        .collect()
}

/// Response of `GET /api/blog`: the page, the sidebar categories and the
/// filters that produced it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BlogListing {
    #[serde(flatten)]
    pub page: super::pagination::Page<posts::PostSummary>,
    pub categories: Vec<CategoryWithCount>,
    pub sort_by: &'static str,
    pub tag: Option<String>,
    pub category: Option<String>,
    pub query: Option<String>,
}
