//! Pagination

/// Page size used when the caller asks for a non-positive one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// First page index; pages are 1-based.
pub const FIRST_PAGE: i64 = 1;

/// A resolved `LIMIT`/`OFFSET` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Resolve a 1-based page index and page size into a query window.
    ///
    /// Non-positive sizes fall back to [`DEFAULT_PAGE_SIZE`] and non-positive
    /// indexes fall back to [`FIRST_PAGE`].
    #[must_use]
    pub fn new(page_index: i64, page_size: i64) -> Self {
        let limit = if page_size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        let page_index = if page_index <= 0 {
            FIRST_PAGE
        } else {
            page_index
        };

        Self {
            limit,
            offset: (page_index - 1).saturating_mul(limit),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(FIRST_PAGE, DEFAULT_PAGE_SIZE)
    }
}
