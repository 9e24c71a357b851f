use std::collections::HashSet;

use uuid::Uuid;

pub const SIMILAR_GUIDES_LIMIT: usize = 6;

/// What a guide offers, as far as similarity is concerned.
#[derive(Debug, Clone, Default)]
pub struct GuideTraits {
    pub guide_id: Uuid,
    pub is_featured: bool,
    pub is_recommended: bool,
    pub specialties: HashSet<Uuid>,
    /// One entry per schedule (a location may repeat).
    pub schedule_locations: Vec<Uuid>,
    /// One entry per package with the locations it covers.
    pub package_locations: Vec<HashSet<Uuid>>,
}

impl GuideTraits {
    pub fn locations(&self) -> HashSet<Uuid> {
        self.schedule_locations
            .iter()
            .copied()
            .chain(self.package_locations.iter().flatten().copied())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredGuide {
    pub guide_id: Uuid,
    pub score: usize,
}

/// Overlap between `anchor` and `candidate`: shared specialties, plus
/// candidate schedules at a location the anchor works at, plus candidate
/// packages covering such a location.
pub fn similarity_score(anchor: &GuideTraits, anchor_locations: &HashSet<Uuid>, candidate: &GuideTraits) -> usize {
    let specialties = candidate.specialties.intersection(&anchor.specialties).count();
    let schedules = candidate
        .schedule_locations
        .iter()
        .filter(|l| anchor_locations.contains(l))
        .count();
    let packages = candidate
        .package_locations
        .iter()
        .filter(|covered| !covered.is_disjoint(anchor_locations))
        .count();
    specialties + schedules + packages
}

/// Rank candidates by score, then featured, then recommended (all
/// descending) and keep the top `SIMILAR_GUIDES_LIMIT`. The anchor and
/// candidates with nothing in common are dropped.
pub fn rank_similar(anchor: &GuideTraits, candidates: &[GuideTraits]) -> Vec<ScoredGuide> {
    let anchor_locations = anchor.locations();
    let mut scored: Vec<(&GuideTraits, usize)> = candidates
        .iter()
        .filter(|c| c.guide_id != anchor.guide_id)
        .map(|c| (c, similarity_score(anchor, &anchor_locations, c)))
        .filter(|(_, score)| *score > 0)
        .collect();

    scored.sort_by(|(a, sa), (b, sb)| {
        sb.cmp(sa)
            .then(b.is_featured.cmp(&a.is_featured))
            .then(b.is_recommended.cmp(&a.is_recommended))
    });

    scored
        .into_iter()
        .take(SIMILAR_GUIDES_LIMIT)
        .map(|(c, score)| ScoredGuide {
            guide_id: c.guide_id,
            score,
        })
        .collect()
}
