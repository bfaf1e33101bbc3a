//! Pagination utilities for service layer
//!
//! Pages are zero-based. A page past the end is simply empty.

use std::ops::Range;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 0-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub const DEFAULT_PER_PAGE: u32 = 3;

    /// Index range `[page*per_page, min((page+1)*per_page, total))`, clamped to `total`.
    pub fn bounds(self, total: usize) -> Range<usize> {
        let per = self.per_page as usize;
        let start = (self.page as usize).saturating_mul(per).min(total);
        let end = start.saturating_add(per).min(total);
        start..end
    }

    pub fn slice<T>(self, mut items: Vec<T>) -> Vec<T> {
        let range = self.bounds(items.len());
        items.truncate(range.end);
        items.drain(..range.start);
        items
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 0, per_page: Self::DEFAULT_PER_PAGE } }
}
