use totrip_backend::slug::{base_slug, pick_unique, slugify};

#[test]
fn slugify_collapses_separators() {
    assert_eq!(slugify("  Hello,   World! "), "hello-world");
    assert_eq!(slugify("Desert -- Safari_Tour"), "desert-safari_tour");
    assert_eq!(slugify("_Top 10 Tips-"), "top-10-tips");
}

#[test]
fn non_ascii_is_dropped() {
    assert_eq!(slugify("جولة في الرياض"), "");
    assert_eq!(slugify("Riyadh الرياض"), "riyadh");
}

#[test]
fn empty_source_falls_back_to_token() {
    let slug = base_slug("مرشد");
    assert_eq!(slug.len(), 8);
    assert!(slug.chars().all(|c| c.is_ascii_hexdigit()));

    assert_eq!(base_slug("Old Town Walk"), "old-town-walk");
}

#[test]
fn unique_suffix_counts_up() {
    let none: [&str; 0] = [];
    assert_eq!(pick_unique("city-tour", &none), "city-tour");
    assert_eq!(pick_unique("city-tour", &["city-tour"]), "city-tour-2");
    assert_eq!(
        pick_unique("city-tour", &["city-tour", "city-tour-2", "city-tour-4"]),
        "city-tour-3"
    );
}
