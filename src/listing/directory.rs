use std::cmp::Ordering;
use std::collections::HashMap;

use sea_orm::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{guide_languages, guide_specialties, guides, package_locations, packages, schedules};

/// Query string of `GET /api/guides`. Ids that do not parse are ignored,
/// the same as an absent filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryQuery {
    pub location: Option<String>,
    pub specialty: Option<String>,
    pub language: Option<String>,
    pub page: Option<String>,
}

fn parse_id(raw: &Option<String>) -> Option<Uuid> {
    raw.as_deref().and_then(|s| Uuid::parse_str(s.trim()).ok())
}

impl DirectoryQuery {
    pub fn location(&self) -> Option<Uuid> {
        parse_id(&self.location)
    }

    pub fn specialty(&self) -> Option<Uuid> {
        parse_id(&self.specialty)
    }

    pub fn language(&self) -> Option<Uuid> {
        parse_id(&self.language)
    }

    /// Active guides narrowed by the present filters. Each filter is an
    /// `id IN (...)` predicate so a guide matching through several schedules
    /// or packages still appears once.
    pub fn filtered(&self) -> Select<guides::Entity> {
        active_guides()
            .apply_if(self.location(), |q, location_id| q.filter(at_location(location_id)))
            .apply_if(self.specialty(), |q, specialty_id| {
                q.filter(
                    guides::Column::Id.in_subquery(
                        guide_specialties::Entity::find()
                            .select_only()
                            .column(guide_specialties::Column::GuideId)
                            .filter(guide_specialties::Column::SpecialtyId.eq(specialty_id))
                            .into_query(),
                    ),
                )
            })
            .apply_if(self.language(), |q, language_id| {
                q.filter(
                    guides::Column::Id.in_subquery(
                        guide_languages::Entity::find()
                            .select_only()
                            .column(guide_languages::Column::GuideId)
                            .filter(guide_languages::Column::LanguageId.eq(language_id))
                            .into_query(),
                    ),
                )
            })
    }
}

pub fn active_guides() -> Select<guides::Entity> {
    guides::Entity::find().filter(guides::Column::IsActive.eq(true))
}

/// Guide works at `location_id` through a schedule or a package.
pub fn at_location(location_id: Uuid) -> Condition {
    Condition::any()
        .add(
            guides::Column::Id.in_subquery(
                schedules::Entity::find()
                    .select_only()
                    .column(schedules::Column::GuideId)
                    .filter(schedules::Column::LocationId.eq(location_id))
                    .into_query(),
            ),
        )
        .add(
            guides::Column::Id.in_subquery(
                packages::Entity::find()
                    .select_only()
                    .column(packages::Column::GuideId)
                    .inner_join(package_locations::Entity)
                    .filter(package_locations::Column::LocationId.eq(location_id))
                    .into_query(),
            ),
        )
}

/// Approved-review aggregate for one guide. No reviews means 0 and 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReviewStats {
    pub count: u64,
    pub average: f64,
}

impl ReviewStats {
    pub fn from_ratings(ratings: impl IntoIterator<Item = i32>) -> Self {
        let (count, sum) = ratings
            .into_iter()
            .fold((0u64, 0i64), |(n, s), r| (n + 1, s + r as i64));
        if count == 0 {
            return Self::default();
        }
        Self {
            count,
            average: sum as f64 / count as f64,
        }
    }

    /// Average rounded to one decimal, as displayed.
    pub fn rounded_average(&self) -> f64 {
        (self.average * 10.0).round() / 10.0
    }
}

/// Group `(guide_id, rating)` rows of approved reviews per guide.
pub fn stats_by_guide(rows: impl IntoIterator<Item = (Uuid, i32)>) -> HashMap<Uuid, ReviewStats> {
    let mut ratings: HashMap<Uuid, Vec<i32>> = HashMap::new();
    for (guide_id, rating) in rows {
        ratings.entry(guide_id).or_default().push(rating);
    }
    ratings
        .into_iter()
        .map(|(id, r)| (id, ReviewStats::from_ratings(r)))
        .collect()
}

/// Directory order: featured, then recommended, then average rating, then
/// review count, all descending. The sort is stable, so equal guides keep
/// the order they were loaded in.
pub fn rank_directory(
    guides: Vec<guides::Model>,
    stats: &HashMap<Uuid, ReviewStats>,
) -> Vec<(guides::Model, ReviewStats)> {
    let mut ranked: Vec<_> = guides
        .into_iter()
        .map(|g| {
            let s = stats.get(&g.id).copied().unwrap_or_default();
            (g, s)
        })
        .collect();
    ranked.sort_by(|(a, sa), (b, sb)| directory_order(a, sa, b, sb));
    ranked
}

fn directory_order(
    a: &guides::Model,
    sa: &ReviewStats,
    b: &guides::Model,
    sb: &ReviewStats,
) -> Ordering {
    b.is_featured
        .cmp(&a.is_featured)
        .then(b.is_recommended.cmp(&a.is_recommended))
        .then(sb.average.total_cmp(&sa.average))
        .then(sb.count.cmp(&sa.count))
}
