//! Page arithmetic

use std::ops::Range;

/// Number of pages for `total` rows, never less than one.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Slice bounds of the 0-based `page_index`, clamped to `len`.
pub fn page_bounds(page_index: usize, page_size: usize, len: usize) -> Range<usize> {
    let start = page_index.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Pagination cursor as shown to the user. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
}

impl PageInfo {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    /// `"Page 2 of 5"`
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.page_count)
    }
}
