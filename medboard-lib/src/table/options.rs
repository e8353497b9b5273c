//! Table configuration

use crate::error::TableError;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How the free-text filter matches a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// The lower-cased filter appears anywhere in the cell text.
    #[default]
    Substring,
    /// The match must begin at the start of the cell text or right after a
    /// non-alphanumeric character, so `"active"` does not match `"inactive"`.
    WordPrefix,
}

/// Static table options.
///
/// Callbacks are registered on [`DataTable`](super::DataTable) directly.
///
/// # Example
///
/// ```
/// use medboard_lib::table::TableOptions;
///
/// let options = TableOptions::default()
///     .with_selection(true)
///     .with_page_size(20);
/// assert!(options.validate().is_ok());
///
/// let invalid = TableOptions::default()
///     .with_drag_reorder(true)
///     .with_controlled_page(1);
/// assert!(invalid.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    pub enable_drag_reorder: bool,
    pub enable_selection: bool,
    pub enable_column_visibility_toggle: bool,
    pub enable_pagination: bool,
    pub enable_free_text_search: bool,
    pub page_size: usize,
    /// 1-based page owned by the caller. Switches pagination to controlled mode.
    pub controlled_page: Option<usize>,
    /// Filter text owned by the caller.
    pub controlled_search: Option<String>,
    /// Server-side row count, used for the page count in controlled mode.
    pub total_count: Option<u64>,
    /// Server-side page count in controlled mode. Wins over `total_count`.
    pub total_pages: Option<usize>,
    pub search_mode: SearchMode,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            enable_drag_reorder: false,
            enable_selection: false,
            enable_column_visibility_toggle: true,
            enable_pagination: true,
            enable_free_text_search: true,
            page_size: DEFAULT_PAGE_SIZE,
            controlled_page: None,
            controlled_search: None,
            total_count: None,
            total_pages: None,
            search_mode: SearchMode::default(),
        }
    }
}

impl TableOptions {
    pub fn with_drag_reorder(mut self, enabled: bool) -> Self {
        self.enable_drag_reorder = enabled;
        self
    }

    pub fn with_selection(mut self, enabled: bool) -> Self {
        self.enable_selection = enabled;
        self
    }

    pub fn with_column_visibility_toggle(mut self, enabled: bool) -> Self {
        self.enable_column_visibility_toggle = enabled;
        self
    }

    pub fn with_pagination(mut self, enabled: bool) -> Self {
        self.enable_pagination = enabled;
        self
    }

    pub fn with_free_text_search(mut self, enabled: bool) -> Self {
        self.enable_free_text_search = enabled;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_controlled_page(mut self, page: usize) -> Self {
        self.controlled_page = Some(page);
        self
    }

    pub fn with_controlled_search(mut self, search: impl Into<String>) -> Self {
        self.controlled_search = Some(search.into());
        self
    }

    pub fn with_total_count(mut self, total: u64) -> Self {
        self.total_count = Some(total);
        self
    }

    pub fn with_total_pages(mut self, pages: usize) -> Self {
        self.total_pages = Some(pages);
        self
    }

    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// True when the caller owns the page cursor.
    pub fn is_controlled(&self) -> bool {
        self.controlled_page.is_some()
    }

    /// Rejects option combinations the table cannot honor.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.page_size == 0 {
            return Err(TableError::ZeroPageSize);
        }
        if self.enable_drag_reorder && self.is_controlled() {
            return Err(TableError::DragWithControlledPagination);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TableOptions::default();
        assert!(!options.enable_drag_reorder);
        assert!(!options.enable_selection);
        assert!(options.enable_column_visibility_toggle);
        assert!(options.enable_pagination);
        assert!(options.enable_free_text_search);
        assert_eq!(options.page_size, 10);
        assert_eq!(options.search_mode, SearchMode::Substring);
        assert!(!options.is_controlled());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            TableOptions::default().with_page_size(0).validate(),
            Err(TableError::ZeroPageSize)
        );
        assert_eq!(
            TableOptions::default()
                .with_drag_reorder(true)
                .with_controlled_page(2)
                .validate(),
            Err(TableError::DragWithControlledPagination)
        );
        assert!(TableOptions::default().with_drag_reorder(true).validate().is_ok());
    }
}
