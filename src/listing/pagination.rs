use serde::Serialize;

pub const BLOG_PAGE_SIZE: u64 = 9;
pub const DIRECTORY_PAGE_SIZE: u64 = 12;

/// Number of pages for `total_items`; an empty result still has one (empty) page.
pub fn num_pages(total_items: u64, page_size: u64) -> u64 {
    let page_size = page_size.max(1);
    total_items.div_ceil(page_size).max(1)
}

/// Resolve the raw `page` query value the lenient way:
/// missing or non-integer -> 1, any integer outside `1..=num_pages` -> last page.
pub fn resolve_page(raw: Option<&str>, num_pages: u64) -> u64 {
    let num_pages = num_pages.max(1);
    match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
        None => 1,
        Some(n) if n >= 1 && (n as u64) <= num_pages => n as u64,
        Some(_) => num_pages,
    }
}

/// Zero-based offset of the first item on `page`.
pub fn offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1) * page_size
}

/// One page of a listing plus the numbers a pager needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub num_pages: u64,
    pub total_items: u64,
    pub page_size: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Wrap items that were already fetched for `page`.
    pub fn new(items: Vec<T>, page: u64, total_items: u64, page_size: u64) -> Self {
        let num_pages = num_pages(total_items, page_size);
        Self {
            items,
            page,
            num_pages,
            total_items,
            page_size,
            has_next: page < num_pages,
            has_previous: page > 1,
        }
    }

    /// Cut the requested page out of a fully materialised, ordered result.
    pub fn from_items(all: Vec<T>, raw_page: Option<&str>, page_size: u64) -> Self {
        let total_items = all.len() as u64;
        let page = resolve_page(raw_page, num_pages(total_items, page_size));
        let items = all
            .into_iter()
            .skip(offset(page, page_size) as usize)
            .take(page_size as usize)
            .collect();
        Self::new(items, page, total_items, page_size)
    }

    /// Same page numbers around a replacement item list.
    pub fn with_items<U>(self, items: Vec<U>) -> Page<U> {
        Page {
            items,
            page: self.page,
            num_pages: self.num_pages,
            total_items: self.total_items,
            page_size: self.page_size,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }

    pub fn map<U>(mut self, f: impl FnMut(T) -> U) -> Page<U> {
        let items = std::mem::take(&mut self.items).into_iter().map(f).collect();
        self.with_items(items)
    }
}
