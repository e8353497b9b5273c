//! Plain-text rendering of table views, stat cards and detail fields

use medboard_lib::pages::StatCard;
use medboard_lib::pages::initials;
use medboard_lib::table::DataTable;
use medboard_lib::table::SortDirection;
use medboard_lib::table::TableBody;
use medboard_lib::table::Value;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Widest a column may grow before cells are cut.
const MAX_CELL_WIDTH: usize = 32;

const ELLIPSIS: char = '…';

/// Cuts `text` to at most `width` columns, ending in an ellipsis when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// `[VERIFIED]`
pub fn badge(text: &str) -> String {
    format!("[{}]", text)
}

fn cell_text(column: &str, value: &Value, name: Option<&Value>) -> String {
    match (column, value) {
        ("avatar", _) => name.map(|n| initials(&n.to_string())).unwrap_or_default(),
        ("kyc_status" | "status", Value::String(s)) if !s.is_empty() => badge(s),
        (_, Value::Bool(true)) => "Yes".to_string(),
        (_, Value::Bool(false)) => "No".to_string(),
        _ => value.to_string(),
    }
}

/// Renders the table's current view with its footer lines.
pub fn table(table: &DataTable) -> String {
    let view = table.render();

    let headers: Vec<String> = view
        .headers
        .iter()
        .map(|h| {
            let marker = match h.sort {
                Some(SortDirection::Ascending) => " ↑",
                Some(SortDirection::Descending) => " ↓",
                None => "",
            };
            format!("{}{}", h.header, marker)
        })
        .collect();

    let rows: Vec<Vec<String>> = view
        .rows()
        .iter()
        .map(|rendered| {
            let name = table
                .rows()
                .iter()
                .find(|r| r.id() == rendered.id)
                .map(|r| r.get("name"));
            view.headers
                .iter()
                .zip(&rendered.cells)
                .map(|(h, value)| truncate(&cell_text(&h.id, value, name), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].width())
                .chain(std::iter::once(h.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::new();
    out.push(line(&headers));
    out.push(
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    match &view.body {
        TableBody::Rows(_) => out.extend(rows.iter().map(|r| line(r))),
        TableBody::Empty { message, .. } => out.push((*message).to_string()),
    }

    let mut footer = Vec::new();
    if let Some(page) = &view.page {
        footer.push(page.label());
    }
    if let Some(total) = &view.total_summary {
        footer.push(total.clone());
    }
    if let Some(selected) = &view.selection_summary {
        footer.push(selected.clone());
    }
    if !footer.is_empty() {
        out.push(String::new());
        out.push(footer.join("  ·  "));
    }
    out.join("\n")
}

/// One card per line: `Title: value (description)`.
pub fn cards(cards: &[StatCard]) -> String {
    let width = cards.iter().map(|c| c.title.width()).max().unwrap_or(0);
    cards
        .iter()
        .map(|c| format!("{}  {}  ({})", pad(c.title, width), c.value, c.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Aligned `label  value` lines for detail views.
pub fn fields(fields: &[(&str, String)]) -> String {
    let width = fields.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(label, value)| format!("{}  {}", pad(label, width), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A section title underlined to its width.
pub fn heading(title: &str) -> String {
    format!("{}\n{}", title, "═".repeat(title.width()))
}

/// `★★★☆☆`
pub fn stars(rating: u8) -> String {
    let rating = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(rating), "☆".repeat(5 - rating))
}

#[cfg(test)]
mod tests {
    use medboard_lib::table::Column;
    use medboard_lib::table::Row;
    use medboard_lib::table::TableOptions;

    use super::*;

    fn sample() -> DataTable {
        let columns = vec![
            Column::computed("avatar", "", |row| row.get("photo").clone()),
            Column::key("name", "Name"),
            Column::key("kyc_status", "KYC Status"),
            Column::key("is_active", "Active"),
        ];
        let mut table = DataTable::new(columns, TableOptions::default()).unwrap();
        table
            .set_rows(vec![
                Row::new("1")
                    .with("name", "Ada Obi")
                    .with("kyc_status", "VERIFIED")
                    .with("is_active", true),
                Row::new("2")
                    .with("name", "Bea")
                    .with("kyc_status", "PENDING")
                    .with("is_active", false),
            ])
            .unwrap();
        table
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_table_cells() {
        let out = table(&sample());
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("Name"));
        assert!(lines[2].starts_with("AO"));
        assert!(lines[2].contains("[VERIFIED]"));
        assert!(lines[2].ends_with("Yes"));
        assert!(lines[3].ends_with("No"));
        assert!(out.ends_with("Page 1 of 1"));
    }

    #[test]
    fn test_empty_table() {
        let mut t = sample();
        t.set_filter("nobody");
        let out = table(&t);
        assert_eq!(out.lines().nth(2), Some("No results."));
    }

    #[test]
    fn test_cards_and_fields() {
        let out = cards(&[
            StatCard::new("Total", 3, "All"),
            StatCard::new("Active Doctors", 1, "Now"),
        ]);
        assert_eq!(out, "Total           3  (All)\nActive Doctors  1  (Now)");
        assert_eq!(
            fields(&[("Name", "Ada".into()), ("Email", "a@b".into())]),
            "Name   Ada\nEmail  a@b"
        );
        assert_eq!(stars(3), "★★★☆☆");
    }
}
