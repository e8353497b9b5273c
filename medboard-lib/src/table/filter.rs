//! Free-text filtering

use super::Column;
use super::Row;
use super::SearchMode;

/// Tests one cell text (already lower-cased) against a lower-cased needle.
pub fn text_matches(haystack: &str, needle: &str, mode: SearchMode) -> bool {
    match mode {
        SearchMode::Substring => haystack.contains(needle),
        SearchMode::WordPrefix => haystack.match_indices(needle).any(|(start, _)| {
            haystack[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric())
        }),
    }
}

/// True if any of `columns` holds a searchable value matching `filter`.
///
/// An empty filter matches every row.
pub fn row_matches(row: &Row, columns: &[&Column], filter: &str, mode: SearchMode) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    columns.iter().any(|column| {
        column
            .value(row)
            .search_text()
            .is_some_and(|text| text_matches(&text, &needle, mode))
    })
}

/// Keeps the rows matching `filter` in their original order.
///
/// Only the filterable columns among `columns` are consulted.
pub fn apply<'a>(
    rows: &'a [Row],
    columns: &[&Column],
    filter: &str,
    mode: SearchMode,
) -> Vec<&'a Row> {
    let searchable: Vec<&Column> = columns.iter().copied().filter(|c| c.filterable).collect();
    rows.iter()
        .filter(|row| row_matches(row, &searchable, filter, mode))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn status_rows() -> Vec<Row> {
        vec![
            Row::new("1").with("status", "active"),
            Row::new("2").with("status", "inactive"),
            Row::new("3").with("status", "active"),
        ]
    }

    fn ids(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        let rows = vec![Row::new("1").with("name", "Ada OBI"), Row::new("2").with("name", "Bea")];
        let column = Column::key("name", "Name");
        let found = apply(&rows, &[&column], "obi", SearchMode::Substring);
        assert_eq!(ids(&found), vec!["1"]);
        let found = apply(&rows, &[&column], "OBI", SearchMode::Substring);
        assert_eq!(ids(&found), vec!["1"]);
    }

    #[test]
    fn test_substring_matches_inside_words() {
        let rows = status_rows();
        let column = Column::key("status", "Status");
        let found = apply(&rows, &[&column], "active", SearchMode::Substring);
        assert_eq!(ids(&found), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_word_prefix_rejects_mid_word() {
        let rows = status_rows();
        let column = Column::key("status", "Status");
        let found = apply(&rows, &[&column], "active", SearchMode::WordPrefix);
        assert_eq!(ids(&found), vec!["1", "3"]);
    }

    #[test]
    fn test_word_prefix_after_separator() {
        assert!(text_matches("st. mary's hospital", "hosp", SearchMode::WordPrefix));
        assert!(text_matches("ada-obi", "obi", SearchMode::WordPrefix));
        assert!(!text_matches("adaobi", "obi", SearchMode::WordPrefix));
        // a later occurrence may still start a word
        assert!(text_matches("inactive active", "active", SearchMode::WordPrefix));
    }

    #[test]
    fn test_value_kinds() {
        let rows = vec![
            Row::new("1").with("age", 42).with("is_active", true),
            Row::new("2").with("age", 7).with("is_active", false),
            Row::new("3").with("age", Value::Null).with("tags", vec!["a", "b"]),
        ];
        let age = Column::key("age", "Age");
        let active = Column::key("is_active", "Active");
        let tags = Column::key("tags", "Tags");
        let columns = [&age, &active, &tags];

        assert_eq!(ids(&apply(&rows, &columns, "42", SearchMode::Substring)), vec!["1"]);
        assert_eq!(ids(&apply(&rows, &columns, "inactive", SearchMode::Substring)), vec!["2"]);
        // lists never match
        assert!(apply(&rows, &columns, "a", SearchMode::Substring)
            .iter()
            .all(|r| r.id() != "3"));
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let rows = vec![Row::new("1"), Row::new("2")];
        let column = Column::key("name", "Name");
        assert_eq!(apply(&rows, &[&column], "", SearchMode::Substring).len(), 2);
    }

    #[test]
    fn test_non_filterable_columns_are_skipped() {
        let rows = vec![Row::new("1").with("email", "ada@example.com")];
        let column = Column::key("email", "Email").filterable(false);
        assert!(apply(&rows, &[&column], "ada", SearchMode::Substring).is_empty());

        let computed = Column::computed("loc", "Location", |_| Value::from("Lagos"));
        assert!(apply(&rows, &[&computed], "lagos", SearchMode::Substring).is_empty());
        let computed = computed.filterable(true);
        assert_eq!(apply(&rows, &[&computed], "lagos", SearchMode::Substring).len(), 1);
    }

    #[test]
    fn test_filter_result_is_subset() {
        let rows: Vec<Row> = (0..20)
            .map(|i| Row::new(i.to_string()).with("n", format!("item {}", i)))
            .collect();
        let column = Column::key("n", "N");
        let found = apply(&rows, &[&column], "1", SearchMode::Substring);
        for row in &found {
            assert!(rows.iter().any(|r| r.id() == row.id()));
            assert!(row.get("n").to_string().contains('1'));
        }
        assert_eq!(found.len(), 11);
    }
}
