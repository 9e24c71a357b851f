use std::collections::HashSet;
use std::hash::Hash;

pub const RELATED_POSTS_LIMIT: usize = 3;

/// Pick up to `RELATED_POSTS_LIMIT` posts related to `anchor`.
///
/// `same_category` are published posts sharing the anchor's first category,
/// newest first; `newest` are the newest published posts overall. The anchor
/// and duplicates are skipped, same-category posts come first and the rest
/// is backfilled from `newest`.
pub fn pick_related<T, K, F>(anchor: &K, same_category: Vec<T>, newest: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut seen: HashSet<K> = HashSet::from([anchor.clone()]);
    let mut picked = Vec::with_capacity(RELATED_POSTS_LIMIT);

    for post in same_category.into_iter().chain(newest) {
        if picked.len() == RELATED_POSTS_LIMIT {
            break;
        }
        if seen.insert(key(&post)) {
            picked.push(post);
        }
    }
    picked
}
