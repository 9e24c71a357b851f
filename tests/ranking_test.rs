use std::collections::HashSet;

use uuid::Uuid;

use totrip_backend::ranking::related::{RELATED_POSTS_LIMIT, pick_related};
use totrip_backend::ranking::similar::{GuideTraits, SIMILAR_GUIDES_LIMIT, rank_similar, similarity_score};

#[test]
fn related_prefers_same_category_then_backfills() {
    // Posts are plain numbers here; 0 is the anchor.
    let related = pick_related(&0, vec![7], vec![0, 9, 7, 8, 6], |p| *p);
    assert_eq!(related, vec![7, 9, 8]);
}

#[test]
fn related_excludes_anchor_and_duplicates() {
    let related = pick_related(&1, vec![1, 2, 2], vec![3, 2, 1], |p| *p);
    assert_eq!(related, vec![2, 3]);
    assert!(!related.contains(&1));
}

#[test]
fn related_is_capped_and_may_be_short() {
    let related = pick_related(&0, vec![1, 2, 3, 4], vec![5], |p| *p);
    assert_eq!(related.len(), RELATED_POSTS_LIMIT);

    let lonely = pick_related(&0, Vec::new(), vec![0], |p: &i32| *p);
    assert!(lonely.is_empty());
}

fn traits(specialties: &[Uuid], schedules: &[Uuid], packages: &[&[Uuid]]) -> GuideTraits {
    GuideTraits {
        guide_id: Uuid::new_v4(),
        specialties: specialties.iter().copied().collect(),
        schedule_locations: schedules.to_vec(),
        package_locations: packages
            .iter()
            .map(|p| p.iter().copied().collect::<HashSet<_>>())
            .collect(),
        ..Default::default()
    }
}

#[test]
fn score_counts_specialties_schedules_and_packages() {
    let history = Uuid::new_v4();
    let food = Uuid::new_v4();
    let riyadh = Uuid::new_v4();
    let jeddah = Uuid::new_v4();

    let anchor = traits(&[history, food], &[riyadh], &[&[jeddah]]);
    // 1 shared specialty + 2 schedules at Riyadh + 1 package covering Jeddah.
    let candidate = traits(&[history], &[riyadh, riyadh], &[&[jeddah, Uuid::new_v4()], &[Uuid::new_v4()]]);

    assert_eq!(similarity_score(&anchor, &anchor.locations(), &candidate), 4);
}

#[test]
fn similar_excludes_anchor_and_strangers() {
    let hiking = Uuid::new_v4();
    let anchor = traits(&[hiking], &[], &[]);
    let mut itself = anchor.clone();
    itself.specialties.insert(Uuid::new_v4());
    let stranger = traits(&[Uuid::new_v4()], &[Uuid::new_v4()], &[]);
    let match_ = traits(&[hiking], &[], &[]);

    let ranked = rank_similar(&anchor, &[itself, stranger, match_.clone()]);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].guide_id, match_.guide_id);
}

#[test]
fn similar_sorted_by_score_then_flags() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let anchor = traits(&[a, b], &[], &[]);

    let strong = traits(&[a, b], &[], &[]);
    let mut weak_featured = traits(&[a], &[], &[]);
    weak_featured.is_featured = true;
    let mut weak_recommended = traits(&[a], &[], &[]);
    weak_recommended.is_recommended = true;
    let weak = traits(&[b], &[], &[]);

    let ranked = rank_similar(
        &anchor,
        &[weak.clone(), weak_recommended.clone(), strong.clone(), weak_featured.clone()],
    );
    let ids: Vec<Uuid> = ranked.iter().map(|s| s.guide_id).collect();
    assert_eq!(
        ids,
        vec![strong.guide_id, weak_featured.guide_id, weak_recommended.guide_id, weak.guide_id]
    );
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn similar_keeps_top_six() {
    let shared = Uuid::new_v4();
    let anchor = traits(&[shared], &[], &[]);
    let candidates: Vec<GuideTraits> = (0..10).map(|_| traits(&[shared], &[], &[])).collect();

    assert_eq!(rank_similar(&anchor, &candidates).len(), SIMILAR_GUIDES_LIMIT);
}
