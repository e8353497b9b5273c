//! Paginated list envelope

use serde::Deserialize;
use serde::Serialize;

/// The `{count, next, previous, results}` envelope returned by list
/// endpoints.
///
/// Chat lists always carry `current_page` and `total_pages`; review lists
/// may carry `page_size` as well. Other lists leave them `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

impl<T> Paginated<T> {
    /// An empty page.
    pub fn empty() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
            page_size: None,
            current_page: None,
            total_pages: None,
        }
    }

    /// Returns `true` if the backend reports another page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Number of pages of `page_size` items, at least 1.
    ///
    /// Prefers the backend's `total_pages` when present.
    pub fn page_count(&self, page_size: u32) -> u32 {
        if let Some(total) = self.total_pages {
            return total.max(1);
        }
        let size = u64::from(page_size.max(1));
        let pages = self.count.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

/// Results-only envelope used by the KYC record lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultList<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}
