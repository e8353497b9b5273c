//! Feature pages
//!
//! A page composes store queries with a [`DataTable`]: list pages fetch one
//! server page plus the resource's stats concurrently, map entities to rows
//! and hand them to a table in controlled mode. Detail pages fetch one
//! entity and its related lists.
//!
//! Fetch errors are returned to the caller. A failed stats query is logged
//! and replaced by fallback cards; a failed list query leaves the table as
//! it was.

mod appointments;
mod dashboard;
mod doctors;
mod hospitals;
mod kyc;
mod patients;

pub use appointments::*;
pub use dashboard::*;
pub use doctors::*;
pub use hospitals::*;
pub use kyc::*;
pub use patients::*;

use std::sync::Arc;
use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::api::Endpoint;
use crate::api::ListParams;
use crate::error::Error;
use crate::model::Paginated;
use crate::store::AppStore;
use crate::table::Column;
use crate::table::DataTable;
use crate::table::Row;
use crate::table::TableOptions;
use crate::table::Value;

/// Placeholder for missing profile fields.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Rows per server page unless changed.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// An API entity shown as a table row.
pub trait TableEntity {
    /// Column layout of the list table.
    fn columns() -> Vec<Column>;

    /// Flattens the entity, applying display fallbacks.
    fn to_row(&self) -> Row;
}

/// A resource with a paged list page and a stats header.
pub trait ListResource: TableEntity + DeserializeOwned + Sized {
    /// Used in log lines.
    const NAME: &'static str;

    /// Resource-specific list filters.
    type Filter: Clone + Default + Send + Sync;

    type Stats: DeserializeOwned;

    fn list_endpoint(params: &ListParams, filter: &Self::Filter) -> Endpoint<Paginated<Self>>;

    fn stats_endpoint() -> Endpoint<Self::Stats>;

    /// Header cards, falling back to the list count when stats are missing.
    fn stat_cards(stats: Option<&Self::Stats>, list: &Paginated<Self>) -> Vec<StatCard>;

    /// Secondary cards shown only when the stats carry admin fields.
    fn insight_cards(_stats: &Self::Stats) -> Vec<StatCard> {
        Vec::new()
    }
}

/// One headline number.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub description: &'static str,
}

impl StatCard {
    pub fn new(title: &'static str, value: impl ToString, description: &'static str) -> Self {
        Self {
            title,
            value: value.to_string(),
            description,
        }
    }

    /// A card showing `value` as a percentage.
    pub fn percent(title: &'static str, value: Option<f64>, description: &'static str) -> Self {
        Self::new(title, format!("{}%", value.unwrap_or(0.0)), description)
    }
}

/// Returns `value` unless blank, otherwise [`NOT_SPECIFIED`].
pub fn or_not_specified(value: Option<&str>) -> String {
    or_default(value, NOT_SPECIFIED)
}

/// Returns `value` unless blank, otherwise `fallback`.
pub fn or_default(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Up to two upper-case initials, e.g. `"Ada Obi"` → `"AO"`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Leading avatar column: the photo URL, neither hideable nor sortable.
pub(crate) fn avatar_column() -> Column {
    Column::computed("avatar", "", |row| row.get("photo").clone())
        .sortable(false)
        .hideable(false)
}

/// `city` over `state, country`, as one searchable line.
pub(crate) fn location_column() -> Column {
    Column::computed("location", "Location", |row| {
        Value::from(format!(
            "{}, {}, {}",
            row.get("city"),
            row.get("state"),
            row.get("country")
        ))
    })
    .filterable(true)
}

/// Server-paged list of one resource.
///
/// The table runs in controlled mode: paging and search requests made
/// through it are recorded, and the next [`load`](Self::load) fetches the
/// requested page.
pub struct ListPage<R: ListResource> {
    store: AppStore,
    params: ListParams,
    filter: R::Filter,
    table: DataTable,
    list: Option<Paginated<R>>,
    cards: Vec<StatCard>,
    insights: Vec<StatCard>,
    requested_page: Arc<Mutex<Option<usize>>>,
}

impl<R: ListResource> ListPage<R> {
    /// Creates the page at page 1. Nothing is fetched until [`load`](Self::load).
    pub fn new(store: AppStore, filter: R::Filter) -> Result<Self, Error> {
        Self::with_options(store, filter, TableOptions::default().with_selection(true))
    }

    /// Like [`new`](Self::new) with custom table options. Pagination is
    /// always controlled by the page.
    pub fn with_options(
        store: AppStore,
        filter: R::Filter,
        options: TableOptions,
    ) -> Result<Self, Error> {
        let page_size = u32::try_from(options.page_size).unwrap_or(DEFAULT_PAGE_SIZE);
        let options = options
            .with_drag_reorder(false)
            .with_controlled_page(1)
            .with_controlled_search("");

        let requested_page = Arc::new(Mutex::new(None));
        let sink = requested_page.clone();
        let table = DataTable::new(R::columns(), options)?.on_page_change(move |page| {
            if let Ok(mut slot) = sink.lock() {
                *slot = Some(page);
            }
        });

        Ok(Self {
            store,
            params: ListParams::new().page(1).page_size(page_size),
            filter,
            table,
            list: None,
            cards: Vec::new(),
            insights: Vec::new(),
            requested_page,
        })
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    pub fn filter(&self) -> &R::Filter {
        &self.filter
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    /// Table access for sorting, column visibility and selection.
    pub fn table_mut(&mut self) -> &mut DataTable {
        &mut self.table
    }

    /// The last successfully loaded server page.
    pub fn list(&self) -> Option<&Paginated<R>> {
        self.list.as_ref()
    }

    pub fn stat_cards(&self) -> &[StatCard] {
        &self.cards
    }

    pub fn insight_cards(&self) -> &[StatCard] {
        &self.insights
    }

    /// Fetches the current page and the stats concurrently.
    pub async fn load(&mut self) -> Result<(), Error> {
        if let Some(page) = self.take_requested_page() {
            self.params.page = Some(u32::try_from(page).unwrap_or(u32::MAX));
        }

        let list_endpoint = R::list_endpoint(&self.params, &self.filter);
        let stats_endpoint = R::stats_endpoint();
        let (list, stats) = tokio::join!(
            self.store.query(&list_endpoint),
            self.store.query(&stats_endpoint)
        );

        let stats = match stats {
            Ok(response) => Some(response.into_inner()),
            Err(e) => {
                log::warn!("failed to load {} stats: {}", R::NAME, e);
                None
            }
        };
        let list = list?.into_inner();

        let page = self.params.page.unwrap_or(1);
        let page_size = self.params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        self.table
            .set_rows(list.results.iter().map(TableEntity::to_row).collect())?;
        self.table.set_controlled_page(page as usize)?;
        self.table
            .set_totals(None, Some(list.page_count(page_size) as usize));

        self.cards = R::stat_cards(stats.as_ref(), &list);
        self.insights = stats.as_ref().map(R::insight_cards).unwrap_or_default();
        log::debug!(
            "{} page {}: {} of {} rows",
            R::NAME,
            page,
            list.results.len(),
            list.count
        );
        self.list = Some(list);
        Ok(())
    }

    /// Requests `page` (1-based) and loads it.
    pub async fn go_to(&mut self, page: usize) -> Result<(), Error> {
        self.table.set_page(page);
        self.load().await
    }

    /// Loads the next page if there is one.
    pub async fn next_page(&mut self) -> Result<(), Error> {
        self.table.next_page();
        if self.has_requested_page() {
            return self.load().await;
        }
        Ok(())
    }

    /// Loads the previous page if there is one.
    pub async fn previous_page(&mut self) -> Result<(), Error> {
        self.table.previous_page();
        if self.has_requested_page() {
            return self.load().await;
        }
        Ok(())
    }

    /// Changes the server page size and reloads from page 1.
    pub async fn set_page_size(&mut self, page_size: u32) -> Result<(), Error> {
        self.table.set_page_size(page_size as usize)?;
        self.params.page_size = Some(page_size);
        self.load().await
    }

    /// Runs a server-side search from page 1.
    pub async fn search(&mut self, text: &str) -> Result<(), Error> {
        self.table.set_controlled_search(text);
        self.params.search = Some(text.to_string()).filter(|s| !s.is_empty());
        self.params.page = Some(1);
        self.take_requested_page();
        self.load().await
    }

    /// Replaces the resource filters and reloads from page 1.
    pub async fn set_filter(&mut self, filter: R::Filter) -> Result<(), Error> {
        self.filter = filter;
        self.params.page = Some(1);
        self.take_requested_page();
        self.load().await
    }

    /// Drops cached results for this page and fetches again.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        self.store
            .invalidate(R::list_endpoint(&self.params, &self.filter).provided_tags());
        self.load().await
    }

    fn has_requested_page(&self) -> bool {
        self.requested_page
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn take_requested_page(&self) -> Option<usize> {
        self.requested_page.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl<R: ListResource> std::fmt::Debug for ListPage<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListPage")
            .field("resource", &R::NAME)
            .field("params", &self.params)
            .field("table", &self.table)
            .field("cards", &self.cards)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Obi"), "AO");
        assert_eq!(initials("ada lovelace byron"), "AL");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(or_not_specified(None), "Not specified");
        assert_eq!(or_not_specified(Some("  ")), "Not specified");
        assert_eq!(or_not_specified(Some("Lagos")), "Lagos");
        assert_eq!(or_default(Some(""), "No email"), "No email");
    }

    #[test]
    fn test_percent_card() {
        assert_eq!(StatCard::percent("Rate", Some(87.5), "").value, "87.5%");
        assert_eq!(StatCard::percent("Rate", None, "").value, "0%");
    }

    #[test]
    fn test_location_column() {
        let row = Row::new("1")
            .with("city", "Ikeja")
            .with("state", "Lagos")
            .with("country", "Nigeria");
        assert_eq!(
            location_column().value(&row),
            Value::from("Ikeja, Lagos, Nigeria")
        );
    }
}
