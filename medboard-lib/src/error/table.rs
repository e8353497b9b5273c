//! Table configuration and operation errors

/// Errors raised by [`DataTable`](crate::table::DataTable) configuration and
/// column operations.
///
/// Filtering, sorting and paging never fail; these only cover requests the
/// table cannot honor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Drag reorder needs the table to own pagination.
    #[error("drag reorder cannot be combined with controlled pagination")]
    DragWithControlledPagination,

    /// Page size must be at least one row.
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    /// Two rows share the same identifier.
    #[error("duplicate row id '{0}'")]
    DuplicateRowId(String),

    /// A row could not be built because it has no `id` attribute.
    #[error("row has no 'id' attribute")]
    MissingRowId,

    /// The named column does not exist.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// The column is marked as not hideable.
    #[error("column '{0}' cannot be hidden")]
    NotHideable(String),

    /// The column is marked as not sortable.
    #[error("column '{0}' is not sortable")]
    NotSortable(String),

    /// Column visibility toggling is disabled for this table.
    #[error("column visibility toggle is disabled")]
    VisibilityToggleDisabled,
}
