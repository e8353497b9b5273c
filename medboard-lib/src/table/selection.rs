//! Row selection state

use std::collections::HashSet;

/// Tri-state of the select-all checkbox for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    Checked,
    Indeterminate,
    Unchecked,
}

/// ID-based selection.
///
/// Selection is keyed by row id so it survives sorting and filtering.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// All selected ids, sorted for deterministic ordering.
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clears the selection, returning the ids that were deselected.
    pub fn clear(&mut self) -> Vec<String> {
        self.selected.drain().collect()
    }

    /// Toggles one id. Returns true if it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Selects every id in `ids`, keeping the existing selection.
    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.selected.extend(ids.into_iter().map(str::to_string));
    }

    /// Deselects every id in `ids`.
    pub fn deselect_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        for id in ids {
            self.selected.remove(id);
        }
    }

    /// Drops ids not present in `ids`.
    pub fn retain<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        let keep: HashSet<&str> = ids.into_iter().collect();
        self.selected.retain(|id| keep.contains(id.as_str()));
    }

    /// Select-all indicator for the given page of ids.
    pub fn state_for<'a>(&self, page_ids: impl IntoIterator<Item = &'a str>) -> SelectAllState {
        let mut total = 0;
        let mut selected = 0;
        for id in page_ids {
            total += 1;
            if self.selected.contains(id) {
                selected += 1;
            }
        }
        match (total, selected) {
            (0, _) | (_, 0) => SelectAllState::Unchecked,
            (t, s) if t == s => SelectAllState::Checked,
            _ => SelectAllState::Indeterminate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut sel = Selection::new();
        assert!(sel.toggle("a"));
        assert!(sel.is_selected("a"));
        assert!(!sel.toggle("a"));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_select_all_and_state() {
        let mut sel = Selection::new();
        let page = ["a", "b", "c"];
        assert_eq!(sel.state_for(page), SelectAllState::Unchecked);

        sel.toggle("b");
        assert_eq!(sel.state_for(page), SelectAllState::Indeterminate);

        sel.select_all(page);
        assert_eq!(sel.state_for(page), SelectAllState::Checked);
        assert_eq!(sel.selected(), vec!["a", "b", "c"]);

        sel.deselect_all(["a", "b"]);
        assert_eq!(sel.selected(), vec!["c"]);
    }

    #[test]
    fn test_empty_page_is_unchecked() {
        let mut sel = Selection::new();
        sel.toggle("a");
        assert_eq!(sel.state_for([]), SelectAllState::Unchecked);
    }

    #[test]
    fn test_retain_and_clear() {
        let mut sel = Selection::new();
        sel.select_all(["a", "b", "c"]);
        sel.retain(["b", "z"]);
        assert_eq!(sel.selected(), vec!["b"]);
        assert_eq!(sel.clear(), vec!["b".to_string()]);
        assert!(sel.is_empty());
    }
}
