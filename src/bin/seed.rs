//! Seeds the blog and directory vocabularies. Safe to re-run: existing rows
//! are left alone.

use chrono::{Days, NaiveTime, Utc};
use dotenv::dotenv;
use sea_orm::DatabaseConnection;
use totrip_backend::create_pool;
use totrip_backend::db::{blog, locations, vocab};
use totrip_backend::error::ApiError;
use totrip_backend::models::authors::CreateAuthor;
use totrip_backend::models::categories::CreateCategory;
use totrip_backend::models::locations::CreateLocation;
use totrip_backend::models::posts::CreatePost;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

struct SeedPost {
    title: &'static str,
    slug: &'static str,
    intro: &'static str,
    body: &'static str,
    category_slugs: &'static [&'static str],
    days_ago: u64,
}

const CATEGORIES: [(&str, &str); 3] = [
    ("travel-tips", "Travel Tips"),
    ("destinations", "Destinations"),
    ("guides", "Guides"),
];

const POSTS: [SeedPost; 3] = [
    SeedPost {
        title: "Top 10 Destinations in Saudi Arabia",
        slug: "top-10-destinations-saudi-arabia",
        intro: "Discover the most beautiful and historic places in Saudi Arabia.",
        body: "Saudi Arabia is home to some of the most stunning destinations in the Middle East. \
               From the ancient ruins of AlUla to the modern skyline of Riyadh, there is something for everyone.",
        category_slugs: &["destinations", "guides"],
        days_ago: 5,
    },
    SeedPost {
        title: "Essential Travel Tips for First-Time Visitors",
        slug: "essential-travel-tips-first-time-visitors",
        intro: "Everything you need to know before visiting Saudi Arabia.",
        body: "Planning your first trip to Saudi Arabia? Here are some essential tips to make your \
               journey smooth and enjoyable, from cultural etiquette to transportation.",
        category_slugs: &["travel-tips"],
        days_ago: 3,
    },
    SeedPost {
        title: "Best Time to Visit Saudi Arabia",
        slug: "best-time-visit-saudi-arabia",
        intro: "Learn about the best seasons and weather conditions for your trip.",
        body: "The climate in Saudi Arabia varies by region. Winter months are generally the most \
               comfortable for outdoor activities.",
        category_slugs: &["travel-tips", "destinations"],
        days_ago: 1,
    },
];

const LANGUAGES: [(&str, &str); 2] = [("Arabic", "ar"), ("English", "en")];
const SPECIALTIES: [&str; 3] = ["Historical Tours", "Adventure Tours", "Cultural Tours"];
const LOCATIONS: [&str; 3] = ["Riyadh", "Jeddah", "Mecca"];

async fn seed_categories(db: &DatabaseConnection) -> Result<Vec<(String, Uuid)>, ApiError> {
    let mut ids = Vec::new();
    for (slug, name) in CATEGORIES {
        let category = match blog::get_category_by_slug(db, slug).await? {
            Some(existing) => existing,
            None => {
                let created = blog::create_category(
                    db,
                    CreateCategory {
                        name: name.to_string(),
                        slug: Some(slug.to_string()),
                    },
                )
                .await?;
                tracing::info!(slug, "created category");
                created
            }
        };
        ids.push((slug.to_string(), category.id));
    }
    Ok(ids)
}

async fn seed_posts(
    db: &DatabaseConnection,
    author_id: Uuid,
    categories: &[(String, Uuid)],
) -> Result<(), ApiError> {
    let today = Utc::now().date_naive();
    for post in &POSTS {
        if blog::get_post_by_slug(db, post.slug).await?.is_some() {
            tracing::info!(slug = post.slug, "post already exists");
            continue;
        }
        let post_date = today - Days::new(post.days_ago);
        let category_ids = post
            .category_slugs
            .iter()
            .filter_map(|wanted| {
                categories
                    .iter()
                    .find(|(slug, _)| slug == wanted)
                    .map(|(_, id)| *id)
            })
            .collect();

        blog::create_post(
            db,
            CreatePost {
                title: post.title.to_string(),
                slug: Some(post.slug.to_string()),
                post_date: Some(post_date),
                intro: post.intro.to_string(),
                body: post.body.to_string(),
                author_id: Some(author_id),
                featured_image_url: None,
                read_time: Some(5),
                tags: Vec::new(),
                category_ids,
            },
        )
        .await?;
        blog::publish_post_at(db, post.slug, post_date.and_time(NaiveTime::MIN).and_utc()).await?;
        tracing::info!(slug = post.slug, "created and published post");
    }
    Ok(())
}

async fn seed(db: &DatabaseConnection) -> Result<(), ApiError> {
    let categories = seed_categories(db).await?;

    let author = match blog::get_author_by_name(db, "Admin").await? {
        Some(author) => author,
        None => {
            blog::create_author(
                db,
                CreateAuthor {
                    name: "Admin".to_string(),
                    bio: Some("Administrator and content creator.".to_string()),
                    profile_image_url: None,
                },
            )
            .await?
        }
    };
    seed_posts(db, author.id, &categories).await?;

    for (name, code) in LANGUAGES {
        let entry = vocab::get_or_create_language(db, name, code).await?;
        tracing::info!(name, created = entry.created, "language");
    }
    for name in SPECIALTIES {
        let entry = vocab::get_or_create_specialty(db, name).await?;
        tracing::info!(name, created = entry.created, "specialty");
    }
    for name in LOCATIONS {
        if locations::get_location_by_name(db, name).await?.is_none() {
            locations::insert_location(
                db,
                CreateLocation {
                    name: name.to_string(),
                    city: name.to_string(),
                    country: None,
                    description: None,
                    is_popular: true,
                },
            )
            .await?;
            tracing::info!(name, "created location");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = create_pool(&database_url)
        .await
        .expect("Failed to connect to the database");

    match seed(&db).await {
        Ok(()) => tracing::info!("Seeding finished"),
        Err(e) => {
            tracing::error!(error = %e, "Seeding failed");
            std::process::exit(1);
        }
    }
}
