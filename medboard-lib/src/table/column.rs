//! Column descriptors

use std::fmt;
use std::sync::Arc;

use super::Row;
use super::Value;

/// How a column reads its value from a row.
#[derive(Clone)]
pub enum Accessor {
    /// An attribute key, optionally a dotted path into nested objects.
    Key(String),
    /// A function of the whole row.
    Computed(Arc<dyn Fn(&Row) -> Value + Send + Sync>),
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Accessor::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Column configuration.
///
/// Key columns are sortable, hideable and searchable by default. Computed
/// columns are sortable and hideable but only searchable when enabled with
/// [`filterable`](Self::filterable).
///
/// # Example
///
/// ```
/// use medboard_lib::table::{Column, Value};
///
/// let columns = vec![
///     Column::key("avatar", "").sortable(false).hideable(false),
///     Column::key("name", "Name").hideable(false),
///     Column::computed("location", "Location", |row| {
///         Value::from(format!("{}, {}", row.get("state"), row.get("country")))
///     }),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    pub id: String,
    pub header: String,
    pub accessor: Accessor,
    pub sortable: bool,
    pub hideable: bool,
    pub filterable: bool,
}

impl Column {
    /// A column reading the attribute named `id`.
    pub fn key(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: Accessor::Key(id.clone()),
            id,
            header: header.into(),
            sortable: true,
            hideable: true,
            filterable: true,
        }
    }

    /// A column reading the attribute at `path`, identified by `id`.
    pub fn path(id: impl Into<String>, header: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            accessor: Accessor::Key(path.into()),
            ..Self::key(id, header)
        }
    }

    /// A column whose value is computed from the row.
    pub fn computed<F>(id: impl Into<String>, header: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Row) -> Value + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: Accessor::Computed(Arc::new(f)),
            sortable: true,
            hideable: true,
            filterable: false,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn hideable(mut self, hideable: bool) -> Self {
        self.hideable = hideable;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Reads this column's value from `row`. Missing paths yield `Null`.
    pub fn value(&self, row: &Row) -> Value {
        match &self.accessor {
            Accessor::Key(key) => row.get_path(key).clone(),
            Accessor::Computed(f) => f(row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let key = Column::key("name", "Name");
        assert!(key.sortable && key.hideable && key.filterable);

        let computed = Column::computed("x", "X", |_| Value::Null);
        assert!(computed.sortable && computed.hideable);
        assert!(!computed.filterable);
    }

    #[test]
    fn test_values() {
        let row = Row::new("1")
            .with("first", "Ada")
            .with("hospital", serde_json::json!({"name": "St. Mary"}));

        assert_eq!(Column::key("first", "First").value(&row), Value::from("Ada"));
        assert_eq!(
            Column::path("hospital", "Hospital", "hospital.name").value(&row),
            Value::from("St. Mary")
        );
        assert!(Column::key("nope", "Nope").value(&row).is_null());

        let upper = Column::computed("upper", "Upper", |r| {
            Value::from(r.get("first").to_string().to_uppercase())
        });
        assert_eq!(upper.value(&row), Value::from("ADA"));
    }
}
