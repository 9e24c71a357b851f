use std::collections::{HashMap, HashSet};

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::*;
use uuid::Uuid;

use crate::db::slug_for_new;
use crate::error::ApiError;
use crate::listing::blog::{self as listing, BlogListing, BlogQuery, BlogSort};
use crate::listing::pagination::{self, BLOG_PAGE_SIZE, Page};
use crate::models::authors::{self, CreateAuthor};
use crate::models::categories::{self, CategoryWithCount, CreateCategory};
use crate::models::posts::{self, CreatePost, PostDetail, PostStatus, PostSummary};
use crate::models::{post_categories, post_tags, tags};
use crate::ranking::related::{RELATED_POSTS_LIMIT, pick_related};

// ── Listing ──

/// One page of published posts for the blog index, with category counts.
pub async fn list_posts(db: &DatabaseConnection, query: &BlogQuery) -> Result<BlogListing, DbErr> {
    let total = query.filtered().count(db).await?;
    let page = pagination::resolve_page(
        query.page.as_deref(),
        pagination::num_pages(total, BLOG_PAGE_SIZE),
    );

    let items = query
        .select()
        .offset(pagination::offset(page, BLOG_PAGE_SIZE))
        .limit(BLOG_PAGE_SIZE)
        .all(db)
        .await?
        .into_iter()
        .map(PostSummary::from)
        .collect();

    Ok(BlogListing {
        page: Page::new(items, page, total, BLOG_PAGE_SIZE),
        categories: categories_with_counts(db).await?,
        sort_by: query.sort().as_str(),
        tag: query.tag().map(str::to_string),
        category: query.category().map(str::to_string),
        query: query.search().map(str::to_string),
    })
}

/// All categories by name, each with its number of published posts.
pub async fn categories_with_counts(db: &DatabaseConnection) -> Result<Vec<CategoryWithCount>, DbErr> {
    let counts: Vec<(Uuid, i64)> = post_categories::Entity::find()
        .select_only()
        .column(post_categories::Column::CategoryId)
        .column_as(post_categories::Column::PostId.count(), "post_count")
        .inner_join(posts::Entity)
        .filter(posts::Column::Status.eq(PostStatus::Published))
        .group_by(post_categories::Column::CategoryId)
        .into_tuple()
        .all(db)
        .await?;
    let counts: HashMap<Uuid, u64> = counts
        .into_iter()
        .map(|(id, n)| (id, Ord::max(n, 0) as u64))
        .collect();

    Ok(listing::with_counts(all_categories(db).await?, &counts))
}

pub async fn all_categories(db: &DatabaseConnection) -> Result<Vec<categories::Model>, DbErr> {
    categories::Entity::find()
        .order_by_asc(categories::Column::Name)
        .all(db)
        .await
}

// ── Detail ──

pub async fn get_published_post(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<posts::Model>, DbErr> {
    listing::published()
        .filter(posts::Column::Slug.eq(slug))
        .one(db)
        .await
}

/// Categories of a post in assignment order.
pub async fn categories_of_post(
    db: &DatabaseConnection,
    post_id: Uuid,
) -> Result<Vec<categories::Model>, DbErr> {
    Ok(post_categories::Entity::find()
        .filter(post_categories::Column::PostId.eq(post_id))
        .order_by_asc(post_categories::Column::Position)
        .find_also_related(categories::Entity)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(_, category)| category)
        .collect())
}

/// Up to three published posts related to `post`; see `pick_related`.
pub async fn related_posts(
    db: &DatabaseConnection,
    post: &posts::Model,
    first_category: Option<Uuid>,
) -> Result<Vec<PostSummary>, DbErr> {
    let limit = RELATED_POSTS_LIMIT as u64;

    let same_category = match first_category {
        Some(category_id) => {
            listing::order(
                listing::published()
                    .filter(posts::Column::Id.ne(post.id))
                    .filter(
                        posts::Column::Id.in_subquery(
                            post_categories::Entity::find()
                                .select_only()
                                .column(post_categories::Column::PostId)
                                .filter(post_categories::Column::CategoryId.eq(category_id))
                                .into_query(),
                        ),
                    ),
                BlogSort::Recent,
            )
            .limit(limit)
            .all(db)
            .await?
        }
        None => Vec::new(),
    };

    // Enough to backfill even if every same-category post shows up again.
    let newest = listing::order(
        listing::published().filter(posts::Column::Id.ne(post.id)),
        BlogSort::Recent,
    )
    .limit(limit * 2)
    .all(db)
    .await?;

    Ok(pick_related(&post.id, same_category, newest, |p| p.id)
        .into_iter()
        .map(PostSummary::from)
        .collect())
}

pub async fn post_detail(db: &DatabaseConnection, post: posts::Model) -> Result<PostDetail, DbErr> {
    let author = match post.author_id {
        Some(author_id) => authors::Entity::find_by_id(author_id).one(db).await?,
        None => None,
    };
    let tags = post
        .find_related(tags::Entity)
        .order_by_asc(tags::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .map(|t| t.name)
        .collect();
    let categories = categories_of_post(db, post.id).await?;
    let related_posts = related_posts(db, &post, categories.first().map(|c| c.id)).await?;
    let all_categories = all_categories(db).await?;

    Ok(PostDetail {
        post,
        author,
        tags,
        categories,
        related_posts,
        all_categories,
    })
}

/// `view_count = view_count + 1` in a single statement, so concurrent
/// readers never lose an increment.
pub async fn increment_view_count(db: &DatabaseConnection, post_id: Uuid) -> Result<(), DbErr> {
    posts::Entity::update_many()
        .col_expr(
            posts::Column::ViewCount,
            Expr::col(posts::Column::ViewCount).add(1),
        )
        .filter(posts::Column::Id.eq(post_id))
        .exec(db)
        .await?;
    Ok(())
}

// ── Admin ──

pub async fn create_category(
    db: &DatabaseConnection,
    input: CreateCategory,
) -> Result<categories::Model, ApiError> {
    let slug = slug_for_new::<categories::Entity, _>(
        db,
        categories::Column::Slug,
        input.slug.as_deref(),
        &input.name,
    )
    .await?;

    Ok(categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        slug: Set(slug),
    }
    .insert(db)
    .await?)
}

pub async fn create_author(
    db: &DatabaseConnection,
    input: CreateAuthor,
) -> Result<authors::Model, DbErr> {
    authors::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        bio: Set(input.bio.unwrap_or_default()),
        profile_image_url: Set(input.profile_image_url),
    }
    .insert(db)
    .await
}

/// Tag ids for `names`, creating the missing tags.
pub async fn get_or_create_tags<C: ConnectionTrait>(
    db: &C,
    names: &[String],
) -> Result<Vec<tags::Model>, DbErr> {
    let mut names: Vec<String> = names
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    names.sort();
    names.dedup();
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let rows = names.iter().map(|name| tags::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.clone()),
    });
    tags::Entity::insert_many(rows)
        .on_conflict(OnConflict::column(tags::Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;

    tags::Entity::find()
        .filter(tags::Column::Name.is_in(names))
        .all(db)
        .await
}

/// Create a draft post with its tags and ordered categories.
pub async fn create_post(db: &DatabaseConnection, input: CreatePost) -> Result<posts::Model, ApiError> {
    if let Some(author_id) = input.author_id {
        if authors::Entity::find_by_id(author_id).one(db).await?.is_none() {
            return Err(ApiError::invalid("author_id", "Unknown author"));
        }
    }
    let mut seen = HashSet::new();
    let category_ids: Vec<Uuid> = input
        .category_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();
    let known = categories::Entity::find()
        .filter(categories::Column::Id.is_in(category_ids.clone()))
        .count(db)
        .await?;
    if known != category_ids.len() as u64 {
        return Err(ApiError::invalid("category_ids", "Unknown category"));
    }

    let txn = db.begin().await?;
    let slug = slug_for_new::<posts::Entity, _>(
        &txn,
        posts::Column::Slug,
        input.slug.as_deref(),
        &input.title,
    )
    .await?;

    let post = posts::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title.trim().to_string()),
        slug: Set(slug),
        post_date: Set(input.post_date.unwrap_or_else(|| chrono::Utc::now().date_naive())),
        intro: Set(input.intro),
        body: Set(input.body),
        author_id: Set(input.author_id),
        featured_image_url: Set(input.featured_image_url),
        read_time: Set(input.read_time.unwrap_or(5)),
        view_count: Set(0),
        status: Set(PostStatus::Draft),
        first_published_at: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(&txn)
    .await?;

    let tags = get_or_create_tags(&txn, &input.tags).await?;
    if !tags.is_empty() {
        post_tags::Entity::insert_many(tags.iter().map(|t| post_tags::ActiveModel {
            post_id: Set(post.id),
            tag_id: Set(t.id),
        }))
        .exec_without_returning(&txn)
        .await?;
    }

    if !category_ids.is_empty() {
        post_categories::Entity::insert_many(category_ids.iter().enumerate().map(
            |(position, category_id)| post_categories::ActiveModel {
                post_id: Set(post.id),
                category_id: Set(*category_id),
                position: Set(position as i32),
            },
        ))
        .exec_without_returning(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(post)
}

pub async fn get_post_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<posts::Model>, DbErr> {
    posts::Entity::find()
        .filter(posts::Column::Slug.eq(slug))
        .one(db)
        .await
}

pub async fn get_category_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<categories::Model>, DbErr> {
    categories::Entity::find()
        .filter(categories::Column::Slug.eq(slug))
        .one(db)
        .await
}

pub async fn get_author_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<authors::Model>, DbErr> {
    authors::Entity::find()
        .filter(authors::Column::Name.eq(name))
        .one(db)
        .await
}

/// Publish a draft now.
pub async fn publish_post(db: &DatabaseConnection, slug: &str) -> Result<posts::Model, DbErr> {
    publish_post_at(db, slug, chrono::Utc::now()).await
}

/// Publish with `published_at` as the first-published time. Re-publishing
/// keeps the original time.
pub async fn publish_post_at(
    db: &DatabaseConnection,
    slug: &str,
    published_at: chrono::DateTime<chrono::Utc>,
) -> Result<posts::Model, DbErr> {
    let post = get_post_by_slug(db, slug)
        .await?
        .ok_or(DbErr::RecordNotFound("Post not found".to_string()))?;

    let first_published_at = post.first_published_at.unwrap_or(published_at);
    let mut active: posts::ActiveModel = post.into();
    active.status = Set(PostStatus::Published);
    active.first_published_at = Set(Some(first_published_at));
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await
}
