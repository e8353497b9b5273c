//! Table rows

use std::collections::BTreeMap;

use super::Value;
use super::value::NULL;
use crate::error::TableError;

/// A table row: a unique id plus an open map of named attributes.
///
/// # Example
///
/// ```
/// use medboard_lib::table::Row;
///
/// let row = Row::new("p-1")
///     .with("name", "Ada Obi")
///     .with("is_active", true);
///
/// assert_eq!(row.get("name").as_str(), Some("Ada Obi"));
/// assert!(row.get("missing").is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    id: String,
    values: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the attribute, or `Null` when absent.
    pub fn get(&self, key: &str) -> &Value {
        self.values.get(key).unwrap_or(&NULL)
    }

    /// Looks up a dotted path such as `"hospital.name"`.
    ///
    /// A key containing dots that exists verbatim wins over path lookup.
    pub fn get_path(&self, path: &str) -> &Value {
        if let Some(value) = self.values.get(path) {
            return value;
        }
        let Some((head, rest)) = path.split_once('.') else {
            return &NULL;
        };
        self.get(head).get_path(rest)
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Builds a row from a JSON object with an `id` field.
    ///
    /// Numeric ids are stringified. Every other field becomes an attribute.
    pub fn from_json(value: serde_json::Value) -> Result<Row, TableError> {
        let serde_json::Value::Object(map) = value else {
            return Err(TableError::MissingRowId);
        };
        let id = match map.get("id") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => return Err(TableError::MissingRowId),
        };
        let values = map
            .into_iter()
            .filter(|(k, _)| k != "id")
            .map(|(k, v)| (k, Value::from(v)))
            .collect();
        Ok(Row { id, values })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json() {
        let row = Row::from_json(json!({"id": 7, "name": "Ada", "hospital": {"name": "St. Mary"}}))
            .unwrap();
        assert_eq!(row.id(), "7");
        assert_eq!(row.get("name"), &Value::from("Ada"));
        assert_eq!(row.get_path("hospital.name"), &Value::from("St. Mary"));
        assert!(row.get("id").is_null());
    }

    #[test]
    fn test_from_json_requires_id() {
        assert_eq!(
            Row::from_json(json!({"name": "Ada"})),
            Err(TableError::MissingRowId)
        );
        assert_eq!(Row::from_json(json!([1, 2])), Err(TableError::MissingRowId));
    }

    #[test]
    fn test_verbatim_dotted_key_wins() {
        let row = Row::new("1").with("a.b", 1);
        assert_eq!(row.get_path("a.b"), &Value::from(1));
    }
}
