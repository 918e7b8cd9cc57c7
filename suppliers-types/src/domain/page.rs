//! Offset pagination.

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_MAX_PER_PAGE: u32 = 100;

/// A clamped page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Applies defaults, floors `page` at 1 and clamps `per_page` to `[1, max_per_page]`.
    pub fn new(page: Option<u32>, per_page: Option<u32>, max_per_page: u32) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, max_per_page.max(1)),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    /// Number of pages needed for `total` rows; zero for an empty table.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        let per_page = self.limit();
        (total + per_page - 1) / per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_MAX_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.page(), 1);
        assert_eq!(page.per_page(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_offset() {
        let page = PageRequest::new(Some(3), Some(20), 100);
        assert_eq!(page.offset(), 40);
        assert_eq!(page.limit(), 20);
    }

    #[test]
    fn test_clamps_pathological_values() {
        let page = PageRequest::new(Some(0), Some(1_000_000), 100);
        assert_eq!(page.page(), 1);
        assert_eq!(page.per_page(), 100);

        let page = PageRequest::new(None, Some(0), 100);
        assert_eq!(page.per_page(), 1);
    }

    #[test]
    fn test_zero_max_still_allows_one_row() {
        let page = PageRequest::new(None, Some(5), 0);
        assert_eq!(page.per_page(), 1);
    }

    #[test]
    fn test_total_pages() {
        let page = PageRequest::new(None, Some(10), 100);
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(1), 1);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
    }

    #[test]
    fn test_large_page_does_not_overflow() {
        let page = PageRequest::new(Some(u32::MAX), Some(100), 100);
        assert_eq!(page.offset(), i64::from(u32::MAX - 1) * 100);
    }
}
