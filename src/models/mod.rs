pub mod authors;
pub mod badge_assignments;
pub mod badges;
pub mod categories;
pub mod certifications;
pub mod gallery;
pub mod guide_certifications;
pub mod guide_languages;
pub mod guide_specialties;
pub mod guides;
pub mod languages;
pub mod locations;
pub mod package_locations;
pub mod packages;
pub mod pages;
pub mod post_categories;
pub mod post_tags;
pub mod posts;
pub mod profiles;
pub mod reviews;
pub mod schedules;
pub mod specialties;
pub mod tags;
pub mod users;
pub mod videos;

use serde::{Deserialize, Deserializer, Serialize};

/// Body of the `add_specialty` / `add_language` / `add_certification` helpers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VocabularyName {
    pub name: Option<String>,
}

/// Owner list of a capped collection (gallery images, videos).
#[derive(Debug, Clone, Serialize)]
pub struct CappedList<T> {
    pub items: Vec<T>,
    pub limit: u64,
    pub remaining: u64,
}

impl<T> CappedList<T> {
    pub fn new(items: Vec<T>, limit: u64) -> Self {
        let remaining = limit.saturating_sub(items.len() as u64);
        Self {
            items,
            limit,
            remaining,
        }
    }
}

/// Distinguishes an absent field from an explicit `null`:
/// absent -> `None`, `null` -> `Some(None)`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
