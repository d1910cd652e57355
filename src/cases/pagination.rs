//! Fixed-size pagination.

use std::ops::Range;

use serde::Serialize;

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Index range of 1-based `page` within `count` items. Clamped to `count`.
pub fn page_range(page: usize, page_size: usize, count: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(count);
    let end = page.saturating_mul(page_size).min(count);
    start..end
}

/// Values for the "Showing {first} to {last} of {total} results" line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl PageSummary {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let range = page_range(page, page_size, total);
        if range.is_empty() {
            return Self {
                first: 0,
                last: 0,
                total,
            };
        }
        Self {
            first: range.start + 1,
            last: range.end,
            total,
        }
    }

    pub fn describe(&self) -> String {
        format!("Showing {} to {} of {} results", self.first, self.last, self.total)
    }
}
