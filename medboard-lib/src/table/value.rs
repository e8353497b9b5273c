//! Dynamic cell values

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A dynamic attribute value held by a [`Row`](super::Row).
///
/// # Example
///
/// ```
/// use medboard_lib::table::Value;
///
/// let name = Value::from("Ada");
/// let age = Value::from(36);
/// let active = Value::from(true);
/// let missing = Value::Null;
/// assert!(missing.is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

pub(crate) static NULL: Value = Value::Null;

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Looks up a dotted path (`"hospital.name"`) through nested objects.
    ///
    /// Returns `Null` when any segment is missing.
    pub fn get_path(&self, path: &str) -> &Value {
        let mut current = self;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment).unwrap_or(&NULL),
                _ => return &NULL,
            };
        }
        current
    }

    /// The text free-text search looks at.
    ///
    /// Strings are lower-cased, numbers print in decimal, booleans read as
    /// `"active"` / `"inactive"`. Other kinds are not searchable.
    pub fn search_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.to_lowercase()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(true) => Some("active".to_string()),
            Value::Bool(false) => Some("inactive".to_string()),
            Value::Null | Value::List(_) | Value::Object(_) => None,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
            Value::List(_) | Value::Object(_) => 4,
        }
    }

    /// Total order used for sorting.
    ///
    /// Kinds order as null < bool < number < string < list/object. Numbers
    /// compare by exact value whether stored as int or float, with NaN after
    /// every other number. Strings compare case-insensitively first; lists
    /// and objects tie.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => cmp_floats(*a, *b),
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Value::String(a), Value::String(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

// =============================================================================
// Numeric ordering
// =============================================================================

/// 2^63, the first float above every `i64`.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// NaN sorts last and `-0.0` equals `0.0`.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if a < b => Ordering::Less,
        (false, false) if a > b => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Compares without casting `int` to `f64`, which rounds above 2^53.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() || float >= I64_UPPER {
        return Ordering::Less;
    }
    if float < -I64_UPPER {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    let fraction = float - whole;
    int.cmp(&(whole as i64)).then_with(|| {
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(v as f64),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text() {
        assert_eq!(Value::from("Lagos").search_text().as_deref(), Some("lagos"));
        assert_eq!(Value::from(42).search_text().as_deref(), Some("42"));
        assert_eq!(Value::from(2.5).search_text().as_deref(), Some("2.5"));
        assert_eq!(Value::from(true).search_text().as_deref(), Some("active"));
        assert_eq!(Value::from(false).search_text().as_deref(), Some("inactive"));
        assert_eq!(Value::Null.search_text(), None);
        assert_eq!(Value::from(vec!["a"]).search_text(), None);
    }

    #[test]
    fn test_cross_kind_order() {
        let mut values = vec![
            Value::from("b"),
            Value::from(vec![1]),
            Value::from(3),
            Value::Null,
            Value::from(true),
            Value::from(1.5),
        ];
        values.sort_by(|a, b| a.sort_cmp(b));
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::from(true),
                Value::from(1.5),
                Value::from(3),
                Value::from("b"),
                Value::from(vec![1]),
            ]
        );
    }

    #[test]
    fn test_nan_sorts_after_numbers() {
        let mut values = vec![
            Value::from(f64::NAN),
            Value::from(2.5),
            Value::from(-1),
            Value::from(f64::NAN),
            Value::from(f64::NEG_INFINITY),
        ];
        values.sort_by(|a, b| a.sort_cmp(b));
        assert_eq!(values[0], Value::from(f64::NEG_INFINITY));
        assert_eq!(values[1], Value::from(-1));
        assert_eq!(values[2], Value::from(2.5));
        assert!(values[3..].iter().all(|v| v.as_f64().is_some_and(f64::is_nan)));

        assert_eq!(Value::from(0.0).sort_cmp(&Value::from(-0.0)), Ordering::Equal);
        assert_eq!(Value::from(7).sort_cmp(&Value::from(f64::NAN)), Ordering::Less);
    }

    #[test]
    fn test_large_ints_compare_exactly_with_floats() {
        let two_53 = 1_i64 << 53;
        let float = Value::from(two_53 as f64);

        assert_eq!(Value::from(two_53).sort_cmp(&float), Ordering::Equal);
        assert_eq!(Value::from(two_53 + 1).sort_cmp(&float), Ordering::Greater);
        assert_eq!(float.sort_cmp(&Value::from(two_53 + 1)), Ordering::Less);
        assert_eq!(Value::from(i64::MAX).sort_cmp(&Value::from(I64_UPPER)), Ordering::Less);
        assert_eq!(Value::from(i64::MIN).sort_cmp(&Value::from(-I64_UPPER)), Ordering::Equal);
        assert_eq!(Value::from(2).sort_cmp(&Value::from(2.5)), Ordering::Less);
        assert_eq!(Value::from(-2).sort_cmp(&Value::from(-2.5)), Ordering::Greater);
        assert_eq!(Value::from(3).sort_cmp(&Value::from(f64::INFINITY)), Ordering::Less);
    }

    #[test]
    fn test_string_order_ignores_case() {
        assert_eq!(Value::from("alpha").sort_cmp(&Value::from("Beta")), Ordering::Less);
    }

    #[test]
    fn test_get_path() {
        let value = Value::from(serde_json::json!({"hospital": {"name": "St. Mary"}}));
        assert_eq!(value.get_path("hospital.name"), &Value::from("St. Mary"));
        assert!(value.get_path("hospital.city").is_null());
        assert!(value.get_path("hospital.name.first").is_null());
    }
}
