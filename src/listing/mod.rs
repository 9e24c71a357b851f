//! Filtered, sorted, paginated result sets for the blog and the guide
//! directory. Query builders live here next to the pure ordering and
//! paging rules so both can be exercised without a database.

pub mod blog;
pub mod directory;
pub mod pagination;

pub use pagination::Page;
