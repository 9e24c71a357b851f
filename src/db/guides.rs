use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use sea_orm::*;
use uuid::Uuid;

use crate::db::{badges, gallery, packages, reviews, schedules, unique_slug, users as user_db, videos};
use crate::error::{ApiError, ApiResult};
use crate::listing::directory::{self, DirectoryQuery, ReviewStats, rank_directory};
use crate::listing::pagination::{DIRECTORY_PAGE_SIZE, Page};
use crate::models::gallery::GALLERY_LIMIT;
use crate::models::guides::{
    self, GuideCard, GuideDashboard, GuideDetail, OwnerProfile, RegisterGuide, UpdateGuideFlags,
    UpdateGuideProfile,
};
use crate::models::reviews::PublicReview;
use crate::models::users::{self, Roles};
use crate::models::videos::{VIDEO_LIMIT, VideoResponse};
use crate::models::{
    certifications, guide_certifications, guide_languages, guide_specialties, languages,
    package_locations, packages as package_model, schedules as schedule_model, specialties,
};
use crate::ranking::similar::{GuideTraits, rank_similar};
use crate::slug;

// ── Lookups ──

pub async fn get_guide_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<guides::Model>, DbErr> {
    guides::Entity::find()
        .filter(guides::Column::UserId.eq(user_id))
        .one(db)
        .await
}

pub async fn get_guide_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<guides::Model>, DbErr> {
    guides::Entity::find_by_id(id).one(db).await
}

/// Public lookup: inactive guides do not exist for visitors.
pub async fn get_active_guide_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<guides::Model>, DbErr> {
    directory::active_guides()
        .filter(guides::Column::Slug.eq(slug))
        .one(db)
        .await
}

pub async fn get_guide_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<guides::Model>, DbErr> {
    guides::Entity::find()
        .filter(guides::Column::Slug.eq(slug))
        .one(db)
        .await
}

/// Display names keyed by user id.
pub async fn names_for(
    db: &DatabaseConnection,
    user_ids: &[Uuid],
) -> Result<HashMap<Uuid, String>, DbErr> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(users::Entity::find()
        .filter(users::Column::Id.is_in(user_ids.to_vec()))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u.public_name()))
        .collect())
}

async fn cards(
    db: &DatabaseConnection,
    ranked: Vec<(guides::Model, ReviewStats)>,
) -> Result<Vec<GuideCard>, DbErr> {
    let user_ids: Vec<Uuid> = ranked.iter().map(|(g, _)| g.user_id).collect();
    let names = names_for(db, &user_ids).await?;
    Ok(ranked
        .into_iter()
        .map(|(guide, stats)| {
            let name = names.get(&guide.user_id).cloned().unwrap_or_default();
            GuideCard::new(&guide, name, stats.count, stats.rounded_average())
        })
        .collect())
}

// ── Directory ──

/// One directory page. Ranking depends on review aggregates, so the
/// filtered set is ranked in memory before it is sliced.
pub async fn directory(db: &DatabaseConnection, query: &DirectoryQuery) -> Result<Page<GuideCard>, DbErr> {
    let guides = query
        .filtered()
        .order_by_asc(guides::Column::CreatedAt)
        .all(db)
        .await?;
    let ids: Vec<Uuid> = guides.iter().map(|g| g.id).collect();
    let stats = reviews::approved_stats(db, &ids).await?;

    let mut page = Page::from_items(
        rank_directory(guides, &stats),
        query.page.as_deref(),
        DIRECTORY_PAGE_SIZE,
    );
    let items = cards(db, std::mem::take(&mut page.items)).await?;
    Ok(page.with_items(items))
}

/// Active guides with an available schedule covering `today`.
pub async fn available_guides(
    db: &DatabaseConnection,
    location_id: Option<Uuid>,
    today: NaiveDate,
) -> Result<Vec<GuideCard>, DbErr> {
    let guides = directory::active_guides()
        .filter(
            guides::Column::Id.in_subquery(schedules::available_on(today, location_id).into_query()),
        )
        .order_by_asc(guides::Column::CreatedAt)
        .all(db)
        .await?;
    let ids: Vec<Uuid> = guides.iter().map(|g| g.id).collect();
    let stats = reviews::approved_stats(db, &ids).await?;
    cards(db, rank_directory(guides, &stats)).await
}

// ── Registration and owner edits ──

/// Turn `user` into a guide. The guide row and the role change commit
/// together; admins keep their role.
pub async fn register_guide(
    db: &DatabaseConnection,
    user: &users::Model,
    input: RegisterGuide,
) -> ApiResult<guides::Model> {
    let txn = db.begin().await?;
    let existing = guides::Entity::find()
        .filter(guides::Column::UserId.eq(user.id))
        .count(&txn)
        .await?;
    if existing > 0 {
        return Err(ApiError::Conflict("You are already registered as a guide".to_string()));
    }

    let source = user
        .username
        .clone()
        .unwrap_or_else(|| user.email_local_part().to_string());
    let slug = unique_slug::<guides::Entity, _>(&txn, guides::Column::Slug, &slug::base_slug(&source))
        .await?;

    let guide = guides::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        slug: Set(slug),
        bio: Set(input.bio.unwrap_or_default()),
        phone_number: Set(input.phone_number.unwrap_or_default()),
        profile_image_url: Set(user.avatar_url.clone()),
        banner_image_url: Set(None),
        years_of_experience: Set(0),
        website: Set(None),
        twitter: Set(None),
        instagram: Set(None),
        facebook: Set(None),
        linkedin: Set(None),
        youtube: Set(None),
        is_active: Set(true),
        is_verified: Set(false),
        is_featured: Set(false),
        is_recommended: Set(false),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(&txn)
    .await?;

    if !user.is_admin() {
        user_db::set_role(&txn, user.clone(), Roles::Guide).await?;
    }
    txn.commit().await?;

    tracing::info!(user_id = %user.id, guide_id = %guide.id, "user registered as guide");
    Ok(guide)
}

fn dedup_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

async fn ensure_known<E>(db: &DatabaseConnection, column: E::Column, ids: &[Uuid], field: &str) -> ApiResult<()>
where
    E: EntityTrait,
    E::Model: Sync,
{
    if ids.is_empty() {
        return Ok(());
    }
    let found = E::find().filter(column.is_in(ids.to_vec())).count(db).await?;
    if found != ids.len() as u64 {
        return Err(ApiError::invalid(field, "Unknown value selected"));
    }
    Ok(())
}

pub async fn update_guide_profile(
    db: &DatabaseConnection,
    guide: guides::Model,
    user: &users::Model,
    input: UpdateGuideProfile,
) -> ApiResult<guides::Model> {
    let language_ids = input.language_ids.as_deref().map(dedup_ids);
    let specialty_ids = input.specialty_ids.as_deref().map(dedup_ids);
    let certification_ids = input.certification_ids.as_deref().map(dedup_ids);
    if let Some(ids) = &language_ids {
        ensure_known::<languages::Entity>(db, languages::Column::Id, ids, "language_ids").await?;
    }
    if let Some(ids) = &specialty_ids {
        ensure_known::<specialties::Entity>(db, specialties::Column::Id, ids, "specialty_ids").await?;
    }
    if let Some(ids) = &certification_ids {
        ensure_known::<certifications::Entity>(db, certifications::Column::Id, ids, "certification_ids")
            .await?;
    }

    let txn = db.begin().await?;
    let guide_id = guide.id;
    let mut active: guides::ActiveModel = guide.into();

    if let Some(bio) = input.bio {
        active.bio = Set(bio);
    }
    if let Some(phone_number) = input.phone_number {
        active.phone_number = Set(phone_number);
    }
    if let Some(url) = input.profile_image_url {
        active.profile_image_url = Set(Some(url));
    }
    if let Some(url) = input.banner_image_url {
        active.banner_image_url = Set(Some(url));
    }
    if let Some(years) = input.years_of_experience {
        active.years_of_experience = Set(years);
    }
    if let Some(website) = input.website {
        active.website = Set(Some(website));
    }
    if let Some(twitter) = input.twitter {
        active.twitter = Set(Some(twitter));
    }
    if let Some(instagram) = input.instagram {
        active.instagram = Set(Some(instagram));
    }
    if let Some(facebook) = input.facebook {
        active.facebook = Set(Some(facebook));
    }
    if let Some(linkedin) = input.linkedin {
        active.linkedin = Set(Some(linkedin));
    }
    if let Some(youtube) = input.youtube {
        active.youtube = Set(Some(youtube));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));
    let guide = active.update(&txn).await?;

    if let Some(ids) = language_ids {
        guide_languages::Entity::delete_many()
            .filter(guide_languages::Column::GuideId.eq(guide_id))
            .exec(&txn)
            .await?;
        if !ids.is_empty() {
            guide_languages::Entity::insert_many(ids.into_iter().map(|language_id| {
                guide_languages::ActiveModel {
                    guide_id: Set(guide_id),
                    language_id: Set(language_id),
                }
            }))
            .exec_without_returning(&txn)
            .await?;
        }
    }
    if let Some(ids) = specialty_ids {
        guide_specialties::Entity::delete_many()
            .filter(guide_specialties::Column::GuideId.eq(guide_id))
            .exec(&txn)
            .await?;
        if !ids.is_empty() {
            guide_specialties::Entity::insert_many(ids.into_iter().map(|specialty_id| {
                guide_specialties::ActiveModel {
                    guide_id: Set(guide_id),
                    specialty_id: Set(specialty_id),
                }
            }))
            .exec_without_returning(&txn)
            .await?;
        }
    }
    if let Some(ids) = certification_ids {
        guide_certifications::Entity::delete_many()
            .filter(guide_certifications::Column::GuideId.eq(guide_id))
            .exec(&txn)
            .await?;
        if !ids.is_empty() {
            guide_certifications::Entity::insert_many(ids.into_iter().map(|certification_id| {
                guide_certifications::ActiveModel {
                    guide_id: Set(guide_id),
                    certification_id: Set(certification_id),
                }
            }))
            .exec_without_returning(&txn)
            .await?;
        }
    }

    if let Some(name) = input.display_name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
        user_db::set_display_name(&txn, user.clone(), name).await?;
    }

    txn.commit().await?;
    Ok(guide)
}

pub async fn update_guide_flags(
    db: &DatabaseConnection,
    guide: guides::Model,
    input: UpdateGuideFlags,
) -> Result<guides::Model, DbErr> {
    let mut active: guides::ActiveModel = guide.into();

    if let Some(is_active) = input.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(is_verified) = input.is_verified {
        active.is_verified = Set(is_verified);
    }
    if let Some(is_featured) = input.is_featured {
        active.is_featured = Set(is_featured);
    }
    if let Some(is_recommended) = input.is_recommended {
        active.is_recommended = Set(is_recommended);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

// ── Similar guides ──

/// Specialties, schedule locations and package locations for each guide.
async fn load_traits(db: &DatabaseConnection, guides: &[guides::Model]) -> Result<Vec<GuideTraits>, DbErr> {
    let ids: Vec<Uuid> = guides.iter().map(|g| g.id).collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let specialty_rows: Vec<(Uuid, Uuid)> = guide_specialties::Entity::find()
        .select_only()
        .column(guide_specialties::Column::GuideId)
        .column(guide_specialties::Column::SpecialtyId)
        .filter(guide_specialties::Column::GuideId.is_in(ids.clone()))
        .into_tuple()
        .all(db)
        .await?;
    let schedule_rows: Vec<(Uuid, Uuid)> = schedule_model::Entity::find()
        .select_only()
        .column(schedule_model::Column::GuideId)
        .column(schedule_model::Column::LocationId)
        .filter(schedule_model::Column::GuideId.is_in(ids.clone()))
        .into_tuple()
        .all(db)
        .await?;
    let package_rows: Vec<(Uuid, Uuid, Uuid)> = package_locations::Entity::find()
        .select_only()
        .column(package_model::Column::GuideId)
        .column(package_locations::Column::PackageId)
        .column(package_locations::Column::LocationId)
        .inner_join(package_model::Entity)
        .filter(package_model::Column::GuideId.is_in(ids))
        .into_tuple()
        .all(db)
        .await?;

    let mut traits: HashMap<Uuid, GuideTraits> = guides
        .iter()
        .map(|g| {
            (
                g.id,
                GuideTraits {
                    guide_id: g.id,
                    is_featured: g.is_featured,
                    is_recommended: g.is_recommended,
                    ..Default::default()
                },
            )
        })
        .collect();
    for (guide_id, specialty_id) in specialty_rows {
        if let Some(t) = traits.get_mut(&guide_id) {
            t.specialties.insert(specialty_id);
        }
    }
    for (guide_id, location_id) in schedule_rows {
        if let Some(t) = traits.get_mut(&guide_id) {
            t.schedule_locations.push(location_id);
        }
    }
    let mut by_package: HashMap<(Uuid, Uuid), HashSet<Uuid>> = HashMap::new();
    for (guide_id, package_id, location_id) in package_rows {
        by_package.entry((guide_id, package_id)).or_default().insert(location_id);
    }
    for ((guide_id, _), covered) in by_package {
        if let Some(t) = traits.get_mut(&guide_id) {
            t.package_locations.push(covered);
        }
    }

    Ok(guides
        .iter()
        .filter_map(|g| traits.remove(&g.id))
        .collect())
}

/// Up to six active guides sharing specialties or locations with `guide`.
pub async fn similar_guides(db: &DatabaseConnection, guide: &guides::Model) -> Result<Vec<GuideCard>, DbErr> {
    let anchor = load_traits(db, std::slice::from_ref(guide))
        .await?
        .pop()
        .unwrap_or_default();
    let specialty_ids: Vec<Uuid> = anchor.specialties.iter().copied().collect();
    let location_ids: Vec<Uuid> = anchor.locations().into_iter().collect();
    if specialty_ids.is_empty() && location_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut overlap = Condition::any();
    if !specialty_ids.is_empty() {
        overlap = overlap.add(
            guides::Column::Id.in_subquery(
                guide_specialties::Entity::find()
                    .select_only()
                    .column(guide_specialties::Column::GuideId)
                    .filter(guide_specialties::Column::SpecialtyId.is_in(specialty_ids))
                    .into_query(),
            ),
        );
    }
    for location_id in location_ids {
        overlap = overlap.add(directory::at_location(location_id));
    }

    let candidates = directory::active_guides()
        .filter(guides::Column::Id.ne(guide.id))
        .filter(overlap)
        .order_by_asc(guides::Column::CreatedAt)
        .all(db)
        .await?;
    let traits = load_traits(db, &candidates).await?;
    let scored = rank_similar(&anchor, &traits);

    let mut by_id: HashMap<Uuid, guides::Model> = candidates.into_iter().map(|g| (g.id, g)).collect();
    let chosen: Vec<guides::Model> = scored
        .iter()
        .filter_map(|s| by_id.remove(&s.guide_id))
        .collect();
    let ids: Vec<Uuid> = chosen.iter().map(|g| g.id).collect();
    let stats = reviews::approved_stats(db, &ids).await?;
    let ranked = chosen
        .into_iter()
        .map(|g| {
            let s = stats.get(&g.id).copied().unwrap_or_default();
            (g, s)
        })
        .collect();
    cards(db, ranked).await
}

// ── Detail and dashboard ──

type VocabSets = (
    Vec<languages::Model>,
    Vec<specialties::Model>,
    Vec<certifications::Model>,
);

/// Languages, specialties and certifications of a guide, each by name.
async fn vocab_sets(db: &DatabaseConnection, guide: &guides::Model) -> Result<VocabSets, DbErr> {
    let languages = guide
        .find_related(languages::Entity)
        .order_by_asc(languages::Column::Name)
        .all(db)
        .await?;
    let specialties = guide
        .find_related(specialties::Entity)
        .order_by_asc(specialties::Column::Name)
        .all(db)
        .await?;
    let certifications = guide
        .find_related(certifications::Entity)
        .order_by_asc(certifications::Column::Name)
        .all(db)
        .await?;
    Ok((languages, specialties, certifications))
}

pub async fn owner_profile(db: &DatabaseConnection, guide: guides::Model) -> Result<OwnerProfile, DbErr> {
    let name = names_for(db, &[guide.user_id])
        .await?
        .remove(&guide.user_id)
        .unwrap_or_default();
    let (languages, specialties, certifications) = vocab_sets(db, &guide).await?;
    Ok(OwnerProfile {
        guide,
        name,
        languages,
        specialties,
        certifications,
    })
}

/// Public detail payload, the part that is safe to cache. `similar_guides`
/// and `is_owner` are left empty for the caller to fill per request.
pub async fn guide_detail(db: &DatabaseConnection, guide: guides::Model) -> Result<GuideDetail, DbErr> {
    let today = chrono::Utc::now().date_naive();
    let name = names_for(db, &[guide.user_id])
        .await?
        .remove(&guide.user_id)
        .unwrap_or_default();

    let (languages, specialties, certifications) = vocab_sets(db, &guide).await?;

    let approved = reviews::approved_for_guide(db, guide.id).await?;
    let stats = ReviewStats::from_ratings(approved.iter().map(|r| r.rating));

    Ok(GuideDetail {
        name,
        languages,
        specialties,
        certifications,
        packages: packages::list_active_for_guide(db, guide.id).await?,
        gallery: gallery::list_for_guide(db, guide.id).await?,
        videos: videos::list_for_guide(db, guide.id)
            .await?
            .into_iter()
            .map(VideoResponse::from)
            .collect(),
        reviews: approved.into_iter().map(PublicReview::from).collect(),
        avg_rating: stats.rounded_average(),
        review_count: stats.count,
        schedules: schedules::upcoming_for_guide(db, guide.id, today).await?,
        badges: badges::for_guide(db, guide.id).await?,
        similar_guides: Vec::new(),
        is_owner: false,
        guide,
    })
}

pub async fn dashboard(db: &DatabaseConnection, guide: guides::Model) -> Result<GuideDashboard, DbErr> {
    let today = chrono::Utc::now().date_naive();
    let reviews = reviews::all_for_guide(db, guide.id).await?;
    let stats = ReviewStats::from_ratings(reviews.iter().filter(|r| r.is_approved).map(|r| r.rating));
    let pending_review_count = reviews.iter().filter(|r| !r.is_approved).count() as u64;
    let videos: Vec<VideoResponse> = videos::list_for_guide(db, guide.id)
        .await?
        .into_iter()
        .map(VideoResponse::from)
        .collect();

    Ok(GuideDashboard {
        packages: packages::list_for_guide(db, guide.id).await?,
        schedules: schedules::upcoming_for_guide(db, guide.id, today).await?,
        gallery_count: gallery::count_for_guide(db, guide.id).await?,
        gallery_limit: GALLERY_LIMIT,
        videos_count: videos.len() as u64,
        video_limit: VIDEO_LIMIT,
        videos,
        reviews,
        avg_rating: stats.rounded_average(),
        review_count: stats.count,
        pending_review_count,
        guide,
    })
}
