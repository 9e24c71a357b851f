use std::collections::HashSet;

use totrip_backend::listing::pagination::{
    BLOG_PAGE_SIZE, DIRECTORY_PAGE_SIZE, Page, num_pages, offset, resolve_page,
};

#[test]
fn page_count_is_never_zero() {
    assert_eq!(num_pages(0, BLOG_PAGE_SIZE), 1);
    assert_eq!(num_pages(9, BLOG_PAGE_SIZE), 1);
    assert_eq!(num_pages(10, BLOG_PAGE_SIZE), 2);
    assert_eq!(num_pages(25, DIRECTORY_PAGE_SIZE), 3);
}

#[test]
fn bad_page_numbers_resolve_leniently() {
    assert_eq!(resolve_page(None, 4), 1);
    assert_eq!(resolve_page(Some("abc"), 4), 1);
    assert_eq!(resolve_page(Some(""), 4), 1);
    assert_eq!(resolve_page(Some("2"), 4), 2);
    assert_eq!(resolve_page(Some(" 3 "), 4), 3);
    assert_eq!(resolve_page(Some("99"), 4), 4);
}

#[test]
fn offset_starts_at_zero() {
    assert_eq!(offset(1, 9), 0);
    assert_eq!(offset(3, 9), 18);
}

#[test]
fn pages_partition_the_result() {
    let all: Vec<u32> = (0..23).collect();
    let pages = num_pages(all.len() as u64, BLOG_PAGE_SIZE);

    let mut seen = HashSet::new();
    let mut total = 0;
    for n in 1..=pages {
        let page = Page::from_items(all.clone(), Some(&n.to_string()), BLOG_PAGE_SIZE);
        assert_eq!(page.page, n);
        total += page.items.len();
        for item in page.items {
            assert!(seen.insert(item), "item {item} appeared on two pages");
        }
    }
    assert_eq!(total, all.len());
}

#[test]
fn page_past_the_end_shows_the_last_page() {
    let all: Vec<u32> = (0..23).collect();
    let page = Page::from_items(all, Some("50"), BLOG_PAGE_SIZE);

    assert_eq!(page.page, 3);
    assert_eq!(page.items, vec![18, 19, 20, 21, 22]);
    assert!(!page.has_next);
    assert!(page.has_previous);
    assert_eq!(page.total_items, 23);
}

#[test]
fn empty_listing_is_one_empty_page() {
    let page: Page<u32> = Page::from_items(Vec::new(), Some("7"), DIRECTORY_PAGE_SIZE);
    assert_eq!(page.page, 1);
    assert_eq!(page.num_pages, 1);
    assert!(page.items.is_empty());
    assert!(!page.has_next && !page.has_previous);
}

#[test]
fn map_keeps_page_numbers() {
    let page = Page::from_items((0..15).collect::<Vec<u32>>(), Some("2"), 12).map(|n| n * 10);
    assert_eq!(page.items, vec![120, 130, 140]);
    assert_eq!(page.page, 2);
    assert_eq!(page.num_pages, 2);
}
