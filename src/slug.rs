//! URL slugs for posts, categories, packages, guides and profiles.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid slug regex"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid separator regex"));

/// Lowercase ASCII slug: word characters kept, whitespace and hyphen runs
/// collapsed to one hyphen, leading/trailing `-` and `_` stripped.
/// Characters outside ASCII are dropped, so an all-Arabic title yields "".
pub fn slugify(input: &str) -> String {
    let lowered = input.to_ascii_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");
    let joined = SEPARATORS.replace_all(cleaned.trim(), "-");
    joined.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Short random token used when a name has nothing slug-able in it.
pub fn fallback_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// The base slug for `source`, or a random token if it slugifies to nothing.
pub fn base_slug(source: &str) -> String {
    let slug = slugify(source);
    if slug.is_empty() { fallback_token() } else { slug }
}

/// First free slug among `base`, `base-2`, `base-3`, ... given the slugs
/// already in use (typically every stored slug starting with `base`).
pub fn pick_unique<S: AsRef<str>>(base: &str, taken: &[S]) -> String {
    let taken: HashSet<&str> = taken.iter().map(AsRef::as_ref).collect();
    if !taken.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| format!("{base}-{}", fallback_token()))
}
