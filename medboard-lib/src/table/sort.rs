//! Multi-column sorting

use std::cmp::Ordering;

use super::Column;
use super::Row;
use super::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// One entry of the sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Ordered list of sort keys. Earlier keys take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    keys: Vec<SortKey>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        self.keys
            .iter()
            .find(|k| k.column == column)
            .map(|k| k.direction)
    }

    /// Replaces the sort order with a single key.
    pub fn set(&mut self, column: impl Into<String>, direction: SortDirection) {
        self.keys = vec![SortKey::new(column, direction)];
    }

    /// Cycles `column` through ascending, descending and unsorted.
    ///
    /// Without `additive`, every other key is dropped. With it, the other
    /// keys keep their position and a new key is appended last.
    pub fn toggle(&mut self, column: &str, additive: bool) -> Option<SortDirection> {
        let next = match self.direction_of(column) {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        };

        if !additive {
            self.keys.retain(|k| k.column == column);
        }

        match next {
            Some(direction) => match self.keys.iter_mut().find(|k| k.column == column) {
                Some(key) => key.direction = direction,
                None => self.keys.push(SortKey::new(column, direction)),
            },
            None => self.keys.retain(|k| k.column != column),
        }
        next
    }
}

/// Stable-sorts `rows` by `keys`. Keys naming unknown columns are ignored.
pub fn apply(rows: &mut Vec<&Row>, keys: &[SortKey], columns: &[Column]) {
    let active: Vec<(&Column, SortDirection)> = keys
        .iter()
        .filter_map(|key| {
            columns
                .iter()
                .find(|c| c.id == key.column)
                .map(|c| (c, key.direction))
        })
        .collect();
    if active.is_empty() {
        return;
    }

    let mut decorated: Vec<(Vec<Value>, &Row)> = rows
        .drain(..)
        .map(|row| (active.iter().map(|(c, _)| c.value(row)).collect(), row))
        .collect();

    decorated.sort_by(|(a, _), (b, _)| {
        for (i, (_, direction)) in active.iter().enumerate() {
            let ord = a[i].sort_cmp(&b[i]);
            let ord = match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    rows.extend(decorated.into_iter().map(|(_, row)| row));
}
