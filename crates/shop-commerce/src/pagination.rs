//! Listing page arithmetic.

use serde::{Deserialize, Serialize};

/// Where a listing page sits within the full result set. Pages start at 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    /// Items across all pages.
    pub total: i64,
    /// Never less than 1, even for an empty listing.
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = match (total, per_page) {
            (t, p) if t <= 0 || p <= 0 => 1,
            (t, p) => t / p + i64::from(t % p != 0),
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Position of the first item on this page, or 0 when nothing is listed.
    pub fn start_item(&self) -> i64 {
        if self.total <= 0 || self.page > self.total_pages {
            return 0;
        }
        (self.page - 1)
            .saturating_mul(self.per_page)
            .saturating_add(1)
    }

    /// Position of the last item on this page.
    pub fn end_item(&self) -> i64 {
        if self.start_item() == 0 {
            return 0;
        }
        self.page.saturating_mul(self.per_page).min(self.total)
    }

    pub fn is_last(&self) -> bool {
        !self.has_next
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 12, 0)
    }
}
