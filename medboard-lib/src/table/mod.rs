//! List/table state engine
//!
//! [`DataTable`] owns a row set plus its derived state: sort order, hidden
//! columns, selection, free-text filter and the pagination cursor. All
//! operations are synchronous and never fail on empty or filtered data.
//!
//! # Example
//!
//! ```
//! use medboard_lib::table::{Column, DataTable, Row, TableOptions};
//!
//! let columns = vec![Column::key("name", "Name"), Column::key("city", "City")];
//! let mut table = DataTable::new(columns, TableOptions::default().with_page_size(2)).unwrap();
//! table
//!     .set_rows(vec![
//!         Row::new("1").with("name", "Ada").with("city", "Lagos"),
//!         Row::new("2").with("name", "Bea").with("city", "Abuja"),
//!         Row::new("3").with("name", "Cal").with("city", "Lagos"),
//!     ])
//!     .unwrap();
//!
//! table.set_filter("lagos");
//! let ids: Vec<_> = table.page_rows().iter().map(|r| r.id().to_string()).collect();
//! assert_eq!(ids, vec!["1", "3"]);
//! ```

mod column;
pub mod filter;
mod options;
mod pagination;
mod render;
mod row;
mod selection;
pub mod sort;
mod value;

pub use column::*;
pub use options::*;
pub use pagination::*;
pub use render::*;
pub use row::*;
pub use selection::*;
pub use sort::SortDirection;
pub use sort::SortKey;
pub use sort::SortState;
pub use value::*;

use std::collections::HashSet;
use std::fmt;

use crate::error::TableError;

type PageCallback = Box<dyn FnMut(usize) + Send>;
type SearchCallback = Box<dyn FnMut(&str) + Send>;
type RowsCallback = Box<dyn FnMut(&[&Row]) + Send>;
type DataCallback = Box<dyn FnMut(&[Row]) + Send>;

#[derive(Default)]
struct Callbacks {
    on_page_change: Option<PageCallback>,
    on_search_change: Option<SearchCallback>,
    on_rows_selected: Option<RowsCallback>,
    on_data_change: Option<DataCallback>,
}

/// Table state over a set of [`Row`]s.
///
/// Pagination runs in one of two modes:
///
/// * **internal**: the table slices the filtered and sorted rows itself;
/// * **controlled** (`controlled_page` set): the caller pages on the server,
///   the table only emits `on_page_change` requests and renders the rows it
///   was given.
pub struct DataTable {
    rows: Vec<Row>,
    columns: Vec<Column>,
    options: TableOptions,
    sort: SortState,
    hidden: HashSet<String>,
    selection: Selection,
    filter: String,
    // 0-based, internal mode only
    page_index: usize,
    callbacks: Callbacks,
}

impl fmt::Debug for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("options", &self.options)
            .field("sort", &self.sort)
            .field("hidden", &self.hidden)
            .field("selection", &self.selection)
            .field("filter", &self.filter)
            .field("page_index", &self.page_index)
            .finish_non_exhaustive()
    }
}

impl DataTable {
    /// Creates an empty table after validating `options`.
    pub fn new(columns: Vec<Column>, options: TableOptions) -> Result<Self, TableError> {
        options.validate()?;
        Ok(Self {
            rows: Vec::new(),
            columns,
            filter: options.controlled_search.clone().unwrap_or_default(),
            options,
            sort: SortState::new(),
            hidden: HashSet::new(),
            selection: Selection::new(),
            page_index: 0,
            callbacks: Callbacks::default(),
        })
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// Called with the requested 1-based page in controlled mode.
    pub fn on_page_change(mut self, f: impl FnMut(usize) + Send + 'static) -> Self {
        self.callbacks.on_page_change = Some(Box::new(f));
        self
    }

    /// Called whenever the user edits the filter text.
    pub fn on_search_change(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.callbacks.on_search_change = Some(Box::new(f));
        self
    }

    /// Called with the selected rows after every selection change.
    pub fn on_rows_selected(mut self, f: impl FnMut(&[&Row]) + Send + 'static) -> Self {
        self.callbacks.on_rows_selected = Some(Box::new(f));
        self
    }

    /// Called with the full row set after a drag reorder.
    pub fn on_data_change(mut self, f: impl FnMut(&[Row]) + Send + 'static) -> Self {
        self.callbacks.on_data_change = Some(Box::new(f));
        self
    }

    // =========================================================================
    // Rows and options
    // =========================================================================

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Replaces the row set.
    ///
    /// When the ordered id list differs from the current one the selection
    /// is cleared and the internal page returns to the first page.
    pub fn set_rows(&mut self, rows: Vec<Row>) -> Result<(), TableError> {
        {
            let mut seen = HashSet::with_capacity(rows.len());
            for row in &rows {
                if !seen.insert(row.id()) {
                    return Err(TableError::DuplicateRowId(row.id().to_string()));
                }
            }
        }

        let same_identity = self.rows.len() == rows.len()
            && self.rows.iter().zip(&rows).all(|(a, b)| a.id() == b.id());
        if !same_identity {
            self.selection.clear();
            self.page_index = 0;
        }
        self.rows = rows;
        Ok(())
    }

    /// Mirrors the caller's page in controlled mode.
    pub fn set_controlled_page(&mut self, page: usize) -> Result<(), TableError> {
        if self.options.enable_drag_reorder {
            return Err(TableError::DragWithControlledPagination);
        }
        self.options.controlled_page = Some(page);
        Ok(())
    }

    /// Mirrors the caller's server-side totals in controlled mode.
    pub fn set_totals(&mut self, total_count: Option<u64>, total_pages: Option<usize>) {
        self.options.total_count = total_count;
        self.options.total_pages = total_pages;
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Updates the filter text from user input and notifies `on_search_change`.
    ///
    /// Ignored when free-text search is disabled.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        if !self.options.enable_free_text_search {
            return;
        }
        self.filter = text.into();
        self.page_index = 0;
        if let Some(cb) = self.callbacks.on_search_change.as_mut() {
            cb(&self.filter);
        }
    }

    /// Mirrors the caller's search text without notifying.
    pub fn set_controlled_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.filter {
            self.page_index = 0;
        }
        self.options.controlled_search = Some(text.clone());
        self.filter = text;
    }

    /// Rows surviving the filter, in sorted order.
    pub fn filtered_rows(&self) -> Vec<&Row> {
        let columns = self.visible_columns();
        let mut rows = if self.options.enable_free_text_search {
            filter::apply(&self.rows, &columns, &self.filter, self.options.search_mode)
        } else {
            self.rows.iter().collect()
        };
        sort::apply(&mut rows, self.sort.keys(), &self.columns);
        rows
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Cycles the column through ascending, descending and unsorted.
    pub fn toggle_sort(
        &mut self,
        column: &str,
        additive: bool,
    ) -> Result<Option<SortDirection>, TableError> {
        self.sortable_column(column)?;
        Ok(self.sort.toggle(column, additive))
    }

    /// Sorts by a single column in the given direction.
    pub fn set_sort(&mut self, column: &str, direction: SortDirection) -> Result<(), TableError> {
        self.sortable_column(column)?;
        self.sort.set(column, direction);
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear();
    }

    fn sortable_column(&self, id: &str) -> Result<&Column, TableError> {
        let column = self.column(id)?;
        if !column.sortable {
            return Err(TableError::NotSortable(id.to_string()));
        }
        Ok(column)
    }

    // =========================================================================
    // Column visibility
    // =========================================================================

    fn column(&self, id: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| TableError::UnknownColumn(id.to_string()))
    }

    pub fn is_column_visible(&self, id: &str) -> bool {
        !self.hidden.contains(id)
    }

    /// Columns currently rendered, in declaration order.
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| !self.hidden.contains(&c.id))
            .collect()
    }

    /// Columns the visibility menu offers, with their current state.
    pub fn column_toggles(&self) -> Vec<(&Column, bool)> {
        self.columns
            .iter()
            .filter(|c| c.hideable)
            .map(|c| (c, self.is_column_visible(&c.id)))
            .collect()
    }

    /// Shows or hides a column.
    pub fn set_column_visible(&mut self, id: &str, visible: bool) -> Result<(), TableError> {
        if !self.options.enable_column_visibility_toggle {
            return Err(TableError::VisibilityToggleDisabled);
        }
        let column = self.column(id)?;
        if visible {
            self.hidden.remove(id);
            return Ok(());
        }
        if !column.hideable {
            return Err(TableError::NotHideable(id.to_string()));
        }
        self.hidden.insert(id.to_string());
        Ok(())
    }

    /// Flips a column's visibility. Returns true if it is now visible.
    pub fn toggle_column_visibility(&mut self, id: &str) -> Result<bool, TableError> {
        let visible = !self.is_column_visible(id);
        self.set_column_visible(id, visible)?;
        Ok(visible)
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        if !self.options.enable_pagination {
            return 1;
        }
        match self.options.controlled_page {
            Some(page) => page,
            None => self.clamped_index(self.filtered_len()) + 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    pub fn page_count(&self) -> usize {
        if !self.options.enable_pagination {
            return 1;
        }
        match self.options.controlled_page {
            Some(page) => self
                .options
                .total_pages
                .or_else(|| {
                    self.options
                        .total_count
                        .map(|n| page_count(n as usize, self.options.page_size))
                })
                .unwrap_or(page)
                .max(1),
            None => page_count(self.filtered_len(), self.options.page_size),
        }
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            page: self.page(),
            page_count: self.page_count(),
            page_size: self.options.page_size,
        }
    }

    /// Moves to the 1-based `page`.
    ///
    /// In controlled mode this only requests the page through
    /// `on_page_change`. Internally the page is clamped to the valid range.
    pub fn set_page(&mut self, page: usize) {
        if !self.options.enable_pagination {
            return;
        }
        let page = page.max(1);
        if self.options.is_controlled() {
            if let Some(cb) = self.callbacks.on_page_change.as_mut() {
                cb(page);
            }
            return;
        }
        let last = page_count(self.filtered_len(), self.options.page_size) - 1;
        self.page_index = (page - 1).min(last);
    }

    pub fn next_page(&mut self) {
        let info = self.page_info();
        if info.has_next() {
            self.set_page(info.page + 1);
        }
    }

    pub fn previous_page(&mut self) {
        let info = self.page_info();
        if info.has_previous() {
            self.set_page(info.page - 1);
        }
    }

    pub fn first_page(&mut self) {
        if self.page() != 1 {
            self.set_page(1);
        }
    }

    pub fn last_page(&mut self) {
        let info = self.page_info();
        if info.page != info.page_count {
            self.set_page(info.page_count);
        }
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        if page_size == 0 {
            return Err(TableError::ZeroPageSize);
        }
        self.options.page_size = page_size;
        self.page_index = 0;
        if self.options.is_controlled() {
            if let Some(cb) = self.callbacks.on_page_change.as_mut() {
                cb(1);
            }
        }
        Ok(())
    }

    /// Rows of the current page.
    ///
    /// Controlled mode renders every filtered row as supplied.
    pub fn page_rows(&self) -> Vec<&Row> {
        let rows = self.filtered_rows();
        if !self.options.enable_pagination || self.options.is_controlled() {
            return rows;
        }
        let index = self.clamped_index(rows.len());
        let bounds = page_bounds(index, self.options.page_size, rows.len());
        rows[bounds].to_vec()
    }

    fn filtered_len(&self) -> usize {
        self.filtered_rows().len()
    }

    fn clamped_index(&self, len: usize) -> usize {
        self.page_index
            .min(page_count(len, self.options.page_size) - 1)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn is_row_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Selected rows in row-set order.
    pub fn selected_rows(&self) -> Vec<&Row> {
        self.rows
            .iter()
            .filter(|r| self.selection.is_selected(r.id()))
            .collect()
    }

    /// Toggles one row. Unknown ids and disabled selection are ignored.
    pub fn toggle_row_selected(&mut self, id: &str) -> bool {
        if !self.options.enable_selection || !self.rows.iter().any(|r| r.id() == id) {
            return false;
        }
        let selected = self.selection.toggle(id);
        self.notify_selection();
        selected
    }

    /// Select-all for the current page.
    ///
    /// Deselects the page when every row on it is already selected,
    /// otherwise selects every row on it.
    pub fn toggle_select_all_page(&mut self) {
        if !self.options.enable_selection {
            return;
        }
        let page_ids: Vec<String> = self
            .page_rows()
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        let ids = page_ids.iter().map(String::as_str);
        if self.selection.state_for(ids.clone()) == SelectAllState::Checked {
            self.selection.deselect_all(ids);
        } else {
            self.selection.select_all(ids);
        }
        self.notify_selection();
    }

    pub fn select_all_state(&self) -> SelectAllState {
        self.selection
            .state_for(self.page_rows().iter().map(|r| r.id()))
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.notify_selection();
    }

    fn notify_selection(&mut self) {
        if let Some(cb) = self.callbacks.on_rows_selected.as_mut() {
            let selected: Vec<&Row> = self
                .rows
                .iter()
                .filter(|r| self.selection.is_selected(r.id()))
                .collect();
            cb(&selected);
        }
    }

    // =========================================================================
    // Drag reorder
    // =========================================================================

    /// Moves the row `source` to the position of `target` in the full row
    /// set (remove, then insert).
    ///
    /// Returns false without changes when reorder is disabled, the ids are
    /// equal or either id is unknown.
    pub fn move_row(&mut self, source: &str, target: &str) -> bool {
        if !self.options.enable_drag_reorder || source == target {
            return false;
        }
        let from = self.rows.iter().position(|r| r.id() == source);
        let to = self.rows.iter().position(|r| r.id() == target);
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };

        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        log::debug!("moved row {} from {} to {}", source, from, to);

        if let Some(cb) = self.callbacks.on_data_change.as_mut() {
            cb(&self.rows);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;

    fn people() -> Vec<Row> {
        vec![
            Row::new("1").with("name", "Ada").with("status", "active"),
            Row::new("2").with("name", "Bea").with("status", "inactive"),
            Row::new("3").with("name", "Cal").with("status", "active"),
            Row::new("4").with("name", "Dee").with("status", "pending"),
            Row::new("5").with("name", "Eve").with("status", "active"),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::key("name", "Name").hideable(false),
            Column::key("status", "Status"),
            Column::computed("initial", "", |r| {
                Value::from(r.get("name").to_string().chars().take(1).collect::<String>())
            })
            .sortable(false),
        ]
    }

    fn table(options: TableOptions) -> DataTable {
        let mut table = DataTable::new(columns(), options).unwrap();
        table.set_rows(people()).unwrap();
        table
    }

    fn ids(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_new_validates_options() {
        let err = DataTable::new(
            columns(),
            TableOptions::default()
                .with_drag_reorder(true)
                .with_controlled_page(1),
        )
        .unwrap_err();
        assert_eq!(err, TableError::DragWithControlledPagination);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut t = table(TableOptions::default());
        let err = t
            .set_rows(vec![Row::new("a"), Row::new("b"), Row::new("a")])
            .unwrap_err();
        assert_eq!(err, TableError::DuplicateRowId("a".to_string()));
        assert_eq!(t.rows().len(), 5);
    }

    #[test]
    fn test_word_prefix_filter_scenario() {
        let mut t = DataTable::new(
            vec![Column::key("status", "Status")],
            TableOptions::default().with_search_mode(SearchMode::WordPrefix),
        )
        .unwrap();
        t.set_rows(vec![
            Row::new("1").with("status", "active"),
            Row::new("2").with("status", "inactive"),
            Row::new("3").with("status", "active"),
        ])
        .unwrap();
        t.set_filter("active");
        assert_eq!(ids(&t.page_rows()), vec!["1", "3"]);
    }

    #[test]
    fn test_internal_pages_reconstruct_filtered_set() {
        let mut t = table(TableOptions::default().with_page_size(2));
        assert_eq!(t.page_count(), 3);

        let mut pages = Vec::new();
        for page in 1..=t.page_count() {
            t.set_page(page);
            pages.push(ids(&t.page_rows()));
        }
        assert_eq!(
            pages,
            vec![vec!["1", "2"], vec!["3", "4"], vec!["5"]]
        );
        let all: Vec<String> = pages.concat();
        assert_eq!(all, ids(&t.filtered_rows()));
    }

    #[test]
    fn test_set_page_clamps_internally() {
        let mut t = table(TableOptions::default().with_page_size(2));
        t.set_page(99);
        assert_eq!(t.page(), 3);
        t.set_page(0);
        assert_eq!(t.page(), 1);
        t.next_page();
        t.next_page();
        t.next_page();
        assert_eq!(t.page(), 3);
        t.previous_page();
        assert_eq!(t.page(), 2);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut t = table(TableOptions::default().with_page_size(2));
        t.set_page(3);
        t.set_page_size(3).unwrap();
        assert_eq!(t.page(), 1);
        assert_eq!(t.page_count(), 2);
        assert_eq!(t.set_page_size(0), Err(TableError::ZeroPageSize));
    }

    #[test]
    fn test_filter_shrink_clamps_page() {
        let mut t = table(TableOptions::default().with_page_size(2));
        t.set_page(3);
        t.set_rows(people()).unwrap();
        assert_eq!(t.page(), 3);
        t.set_filter("ada");
        assert_eq!(t.page(), 1);
        assert_eq!(ids(&t.page_rows()), vec!["1"]);
    }

    #[test]
    fn test_controlled_pagination() {
        let requested = Arc::new(Mutex::new(Vec::new()));
        let sink = requested.clone();
        let mut t = DataTable::new(
            columns(),
            TableOptions::default()
                .with_page_size(2)
                .with_controlled_page(3)
                .with_total_pages(3),
        )
        .unwrap()
        .on_page_change(move |p| sink.lock().unwrap().push(p));

        // the caller supplies whatever page 3 holds
        t.set_rows(vec![Row::new("x").with("name", "X"), Row::new("y").with("name", "Y"), Row::new("z").with("name", "Z")])
            .unwrap();
        assert_eq!(t.page(), 3);
        assert_eq!(t.page_count(), 3);
        assert_eq!(ids(&t.page_rows()), vec!["x", "y", "z"]);

        t.next_page();
        t.previous_page();
        t.set_page(7);
        assert_eq!(*requested.lock().unwrap(), vec![2, 7]);
        // never advances on its own
        assert_eq!(t.page(), 3);

        t.set_controlled_page(2).unwrap();
        assert_eq!(t.page(), 2);
    }

    #[test]
    fn test_controlled_page_count_from_total_count() {
        let mut t = DataTable::new(
            columns(),
            TableOptions::default()
                .with_controlled_page(1)
                .with_total_count(25),
        )
        .unwrap();
        assert_eq!(t.page_count(), 3);
        t.set_totals(None, None);
        assert_eq!(t.page_count(), 1);
    }

    #[test]
    fn test_controlled_page_size_requests_first_page() {
        let requested = Arc::new(Mutex::new(Vec::new()));
        let sink = requested.clone();
        let mut t = DataTable::new(columns(), TableOptions::default().with_controlled_page(4))
            .unwrap()
            .on_page_change(move |p| sink.lock().unwrap().push(p));
        t.set_page_size(20).unwrap();
        assert_eq!(*requested.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_search_callback_and_controlled_search() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = seen.clone();
        let mut t = DataTable::new(columns(), TableOptions::default().with_controlled_search("cal"))
            .unwrap()
            .on_search_change(move |s| sink.lock().unwrap().push(s.to_string()));
        t.set_rows(people()).unwrap();
        assert_eq!(ids(&t.page_rows()), vec!["3"]);

        t.set_filter("eve");
        assert_eq!(*seen.lock().unwrap(), vec!["eve".to_string()]);

        t.set_controlled_search("bea");
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(ids(&t.page_rows()), vec!["2"]);
    }

    #[test]
    fn test_search_disabled() {
        let mut t = table(TableOptions::default().with_free_text_search(false));
        t.set_filter("ada");
        assert_eq!(t.filter(), "");
        assert_eq!(t.filtered_rows().len(), 5);
    }

    #[test]
    fn test_hidden_columns_excluded_from_search() {
        let mut t = table(TableOptions::default());
        t.set_filter("pending");
        assert_eq!(ids(&t.page_rows()), vec!["4"]);

        t.set_column_visible("status", false).unwrap();
        assert!(t.page_rows().is_empty());
        assert!(t.render().is_empty());
    }

    #[test]
    fn test_column_visibility_rules() {
        let mut t = table(TableOptions::default());
        assert_eq!(
            t.set_column_visible("name", false),
            Err(TableError::NotHideable("name".to_string()))
        );
        assert_eq!(
            t.toggle_column_visibility("ghost"),
            Err(TableError::UnknownColumn("ghost".to_string()))
        );
        assert_eq!(t.toggle_column_visibility("status"), Ok(false));
        assert_eq!(t.visible_columns().len(), 2);
        assert_eq!(t.toggle_column_visibility("status"), Ok(true));

        let toggles: Vec<&str> = t.column_toggles().iter().map(|(c, _)| c.id.as_str()).collect();
        assert_eq!(toggles, vec!["status", "initial"]);

        let mut t = table(TableOptions::default().with_column_visibility_toggle(false));
        assert_eq!(
            t.toggle_column_visibility("status"),
            Err(TableError::VisibilityToggleDisabled)
        );
    }

    #[test]
    fn test_sort_rules() {
        let mut t = table(TableOptions::default());
        assert_eq!(
            t.toggle_sort("initial", false),
            Err(TableError::NotSortable("initial".to_string()))
        );
        assert_eq!(
            t.toggle_sort("ghost", false),
            Err(TableError::UnknownColumn("ghost".to_string()))
        );

        t.toggle_sort("status", false).unwrap();
        t.toggle_sort("name", true).unwrap();
        t.toggle_sort("name", true).unwrap();
        assert_eq!(ids(&t.page_rows()), vec!["5", "3", "1", "2", "4"]);

        t.set_sort("name", SortDirection::Ascending).unwrap();
        assert_eq!(ids(&t.page_rows()), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_sort_applies_before_pagination() {
        let mut t = table(TableOptions::default().with_page_size(2));
        t.set_sort("name", SortDirection::Descending).unwrap();
        assert_eq!(ids(&t.page_rows()), vec!["5", "4"]);
    }

    #[test]
    fn test_sort_numbers_with_nan_and_large_ints() {
        let rows = (0..64)
            .map(|i| {
                let score = match i % 4 {
                    0 => Value::from(f64::NAN),
                    1 => Value::from((1_i64 << 53) + i),
                    2 => Value::from((1_i64 << 53) as f64),
                    _ => Value::from(i as f64 / 3.0),
                };
                Row::new(i.to_string()).with("score", score)
            })
            .collect();
        let mut t = DataTable::new(
            vec![Column::key("score", "Score")],
            TableOptions::default().with_pagination(false),
        )
        .unwrap();
        t.set_rows(rows).unwrap();
        t.set_sort("score", SortDirection::Ascending).unwrap();

        let scores: Vec<Value> = t.page_rows().iter().map(|r| r.get("score").clone()).collect();
        assert_eq!(scores.len(), 64);
        assert!(scores.windows(2).all(|w| w[0].sort_cmp(&w[1]).is_le()));
        assert!(scores[48..].iter().all(|v| v.as_f64().is_some_and(f64::is_nan)));
    }

    #[test]
    fn test_select_all_selects_exactly_the_page() {
        let selected = Arc::new(Mutex::new(Vec::<Vec<String>>::new()));
        let sink = selected.clone();
        let mut t = DataTable::new(
            columns(),
            TableOptions::default().with_selection(true).with_page_size(2),
        )
        .unwrap()
        .on_rows_selected(move |rows| {
            sink.lock()
                .unwrap()
                .push(rows.iter().map(|r| r.id().to_string()).collect())
        });
        t.set_rows(people()).unwrap();
        t.set_page(2);

        assert_eq!(t.select_all_state(), SelectAllState::Unchecked);
        t.toggle_select_all_page();
        assert_eq!(ids(&t.selected_rows()), vec!["3", "4"]);
        assert_eq!(t.select_all_state(), SelectAllState::Checked);
        assert_eq!(t.selection_summary().as_deref(), Some("2 of 5 row(s) selected."));

        t.toggle_row_selected("4");
        assert_eq!(t.select_all_state(), SelectAllState::Indeterminate);

        t.toggle_select_all_page();
        assert_eq!(ids(&t.selected_rows()), vec!["3", "4"]);
        t.toggle_select_all_page();
        assert!(t.selected_rows().is_empty());

        let log = selected.lock().unwrap();
        assert_eq!(log.len(), 4);
        assert_eq!(log[0], vec!["3", "4"]);
        assert!(log[3].is_empty());
    }

    #[test]
    fn test_selection_disabled_and_unknown_ids() {
        let mut t = table(TableOptions::default());
        assert!(!t.toggle_row_selected("1"));
        t.toggle_select_all_page();
        assert!(t.selected_rows().is_empty());
        assert_eq!(t.selection_summary(), None);

        let mut t = table(TableOptions::default().with_selection(true));
        assert!(!t.toggle_row_selected("nope"));
        assert!(t.toggle_row_selected("1"));
    }

    #[test]
    fn test_summary_counts_filtered_rows() {
        let mut t = table(TableOptions::default().with_selection(true));
        t.toggle_row_selected("1");
        t.toggle_row_selected("2");
        t.set_filter("ada");
        assert_eq!(t.selection_summary().as_deref(), Some("1 of 1 row(s) selected."));
    }

    #[test]
    fn test_new_row_identity_resets_state() {
        let mut t = table(TableOptions::default().with_selection(true).with_page_size(2));
        t.set_page(2);
        t.toggle_row_selected("3");

        // same ids, new values: state survives
        let mut same = people();
        same[0].set("name", "Ada Obi");
        t.set_rows(same).unwrap();
        assert_eq!(t.page(), 2);
        assert_eq!(ids(&t.selected_rows()), vec!["3"]);

        t.set_rows(people().into_iter().rev().collect()).unwrap();
        assert_eq!(t.page(), 1);
        assert!(t.selected_rows().is_empty());
    }

    #[test]
    fn test_drag_reorder_scenario() {
        let changes = Arc::new(Mutex::new(Vec::<Vec<String>>::new()));
        let sink = changes.clone();
        let mut t = DataTable::new(columns(), TableOptions::default().with_drag_reorder(true))
            .unwrap()
            .on_data_change(move |rows| {
                sink.lock()
                    .unwrap()
                    .push(rows.iter().map(|r| r.id().to_string()).collect())
            });
        t.set_rows((1..=4).map(|i| Row::new(i.to_string())).collect())
            .unwrap();

        assert!(t.move_row("3", "1"));
        let order: Vec<&str> = t.rows().iter().map(Row::id).collect();
        assert_eq!(order, vec!["3", "1", "2", "4"]);
        assert_eq!(*changes.lock().unwrap(), vec![vec!["3", "1", "2", "4"]]);

        assert!(t.move_row("3", "4"));
        let order: Vec<&str> = t.rows().iter().map(Row::id).collect();
        assert_eq!(order, vec!["1", "2", "4", "3"]);
    }

    #[test]
    fn test_drag_noops() {
        let mut t = table(TableOptions::default().with_drag_reorder(true));
        assert!(!t.move_row("2", "2"));
        assert!(!t.move_row("2", "ghost"));
        assert!(!t.move_row("ghost", "2"));

        let mut t = table(TableOptions::default());
        assert!(!t.move_row("1", "2"));
        let order: Vec<&str> = t.rows().iter().map(Row::id).collect();
        assert_eq!(order, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_controlled_page_rejected_with_drag() {
        let mut t = table(TableOptions::default().with_drag_reorder(true));
        assert_eq!(
            t.set_controlled_page(2),
            Err(TableError::DragWithControlledPagination)
        );
    }

    #[test]
    fn test_pagination_disabled_renders_everything() {
        let mut t = table(TableOptions::default().with_pagination(false).with_page_size(2));
        t.set_page(2);
        assert_eq!(t.page(), 1);
        assert_eq!(t.page_rows().len(), 5);
        assert!(t.render().page.is_none());
    }

    #[test]
    fn test_render() {
        let mut t = table(
            TableOptions::default()
                .with_selection(true)
                .with_drag_reorder(true)
                .with_page_size(2),
        );
        t.toggle_row_selected("2");
        t.toggle_sort("name", false).unwrap();

        let view = t.render();
        assert_eq!(view.headers.len(), 3);
        assert_eq!(view.headers[0].sort, Some(SortDirection::Ascending));
        assert!(!view.headers[2].sortable);
        assert_eq!(view.rows().len(), 2);
        assert!(view.rows()[1].selected);
        assert_eq!(view.rows()[0].cells[2], Value::from("A"));
        assert_eq!(view.select_all, Some(SelectAllState::Indeterminate));
        assert!(view.drag_handles);
        assert_eq!(view.page.map(|p| p.label()).as_deref(), Some("Page 1 of 3"));
        assert_eq!(view.page_size_options, &[10, 20, 30, 40, 50]);
        assert_eq!(view.selection_summary.as_deref(), Some("1 of 5 row(s) selected."));
        assert_eq!(view.total_summary, None);
    }

    #[test]
    fn test_render_empty_placeholder() {
        let mut t = table(TableOptions::default().with_selection(true));
        t.set_filter("zzz");
        let view = t.render();
        assert_eq!(
            view.body,
            TableBody::Empty {
                message: "No results.",
                colspan: 4,
            }
        );
        assert_eq!(view.select_all, Some(SelectAllState::Unchecked));
    }

    #[test]
    fn test_render_total_summary() {
        let t = table(TableOptions::default().with_controlled_page(1).with_total_count(42).with_selection(true));
        let view = t.render();
        assert_eq!(view.total_summary.as_deref(), Some("Total: 42 items"));
        assert_eq!(view.selection_summary, None);
    }
}
