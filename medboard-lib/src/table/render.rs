//! Render model
//!
//! A [`TableView`] is the fully derived state of a [`DataTable`]: what a
//! front end draws, with no further computation needed.

use super::DataTable;
use super::PageInfo;
use super::SelectAllState;
use super::SortDirection;
use super::Value;
use super::options::PAGE_SIZE_OPTIONS;

/// Placeholder shown when no rows survive filtering.
pub const EMPTY_MESSAGE: &str = "No results.";

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub id: String,
    pub header: String,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub id: String,
    pub selected: bool,
    pub cells: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Rows(Vec<RenderedRow>),
    /// One placeholder row spanning every rendered column.
    Empty {
        message: &'static str,
        colspan: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub body: TableBody,
    /// Present when row selection is enabled.
    pub select_all: Option<SelectAllState>,
    pub drag_handles: bool,
    /// Present when pagination is enabled.
    pub page: Option<PageInfo>,
    pub page_size_options: &'static [usize],
    /// `"n of m row(s) selected."`
    pub selection_summary: Option<String>,
    /// `"Total: N items"`
    pub total_summary: Option<String>,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        matches!(self.body, TableBody::Empty { .. })
    }

    pub fn rows(&self) -> &[RenderedRow] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Empty { .. } => &[],
        }
    }
}

impl DataTable {
    /// Derives the current view.
    pub fn render(&self) -> TableView {
        let columns = self.visible_columns();
        let sort = self.sort_state();

        let headers = columns
            .iter()
            .map(|c| HeaderCell {
                id: c.id.clone(),
                header: c.header.clone(),
                sortable: c.sortable,
                sort: sort.direction_of(&c.id),
            })
            .collect();

        let page_rows = self.page_rows();
        let body = if page_rows.is_empty() {
            let extra = usize::from(self.options.enable_selection)
                + usize::from(self.options.enable_drag_reorder);
            TableBody::Empty {
                message: EMPTY_MESSAGE,
                colspan: columns.len() + extra,
            }
        } else {
            TableBody::Rows(
                page_rows
                    .iter()
                    .map(|row| RenderedRow {
                        id: row.id().to_string(),
                        selected: self.is_row_selected(row.id()),
                        cells: columns.iter().map(|c| c.value(row)).collect(),
                    })
                    .collect(),
            )
        };

        TableView {
            headers,
            body,
            select_all: self
                .options
                .enable_selection
                .then(|| self.select_all_state()),
            drag_handles: self.options.enable_drag_reorder,
            page: self.options.enable_pagination.then(|| self.page_info()),
            page_size_options: &PAGE_SIZE_OPTIONS,
            selection_summary: self.selection_summary(),
            total_summary: self.options.total_count.map(|n| format!("Total: {} items", n)),
        }
    }

    /// `"n of m row(s) selected."` over the filtered rows.
    ///
    /// Only shown with selection enabled and no server-side total.
    pub fn selection_summary(&self) -> Option<String> {
        if !self.options.enable_selection || self.options.total_count.is_some() {
            return None;
        }
        let filtered = self.filtered_rows();
        let selected = filtered
            .iter()
            .filter(|r| self.is_row_selected(r.id()))
            .count();
        Some(format!("{} of {} row(s) selected.", selected, filtered.len()))
    }
}
