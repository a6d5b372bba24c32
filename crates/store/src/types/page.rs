//! Offset-based pagination types for index-sourced list results.
//!
//! Listing goes through the secondary index, which reports a total hit count
//! alongside a page of items; [`PagedRecords`] derives the page-link metadata
//! from that. Primary-store fallback results carry no pagination metadata at
//! all (see [`crate::lookup::ListOutcome`]).

use serde::{Deserialize, Serialize};

use super::record::LookupRecord;

/// Default page size when the caller does not specify one.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// A requested page of a list result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,

    /// Items per page.
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Creates a page request, clamping `page` to at least 1 and `per_page`
    /// to at least 1.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// The zero-based offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

/// A page of records with the totals needed for pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedRecords {
    /// The records on this page.
    pub items: Vec<LookupRecord>,

    /// 1-based page number.
    pub page: u32,

    /// Items per page.
    pub per_page: u32,

    /// Total matching records across all pages.
    pub total: u64,
}

impl PagedRecords {
    /// Total number of pages: `ceil(total / per_page)`.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.per_page))
    }

    /// The previous page number, only when there is one.
    pub fn prev_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    /// The next page number, only when there is one.
    pub fn next_page(&self) -> Option<u32> {
        (u64::from(self.page) < self.total_pages()).then(|| self.page + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(page: u32, per_page: u32, total: u64) -> PagedRecords {
        PagedRecords {
            items: Vec::new(),
            page,
            per_page,
            total,
        }
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_request_clamps_to_one() {
        let req = PageRequest::new(0, 0);
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, 1);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(paged(1, 10, 25).total_pages(), 3);
        assert_eq!(paged(1, 10, 30).total_pages(), 3);
        assert_eq!(paged(1, 10, 0).total_pages(), 0);
    }

    #[test]
    fn test_middle_page_has_prev_and_next() {
        let p = paged(2, 10, 25);
        assert_eq!(p.prev_page(), Some(1));
        assert_eq!(p.next_page(), Some(3));
    }

    #[test]
    fn test_first_page_has_no_prev() {
        let p = paged(1, 10, 25);
        assert_eq!(p.prev_page(), None);
        assert_eq!(p.next_page(), Some(2));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let p = paged(3, 10, 25);
        assert_eq!(p.prev_page(), Some(2));
        assert_eq!(p.next_page(), None);
    }

    #[test]
    fn test_page_past_end_has_no_next() {
        let p = paged(9, 10, 25);
        assert_eq!(p.next_page(), None);
    }
}
