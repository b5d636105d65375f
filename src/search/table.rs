use num_format::{Locale, ToFormattedString};
use serde_json::Value;

use crate::models::ResultRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Currency,
}

/// One column of the results table.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    pub field: &'static str,
    pub kind: ColumnKind,
}

const fn column(label: &'static str, field: &'static str, kind: ColumnKind) -> Column {
    Column { label, field, kind }
}

pub const COLUMNS: [Column; 13] = [
    column("Street", "street", ColumnKind::Text),
    column("City", "city", ColumnKind::Text),
    column("State", "state", ColumnKind::Text),
    column("Zip", "zip", ColumnKind::Text),
    column("Beds", "bedrooms", ColumnKind::Number),
    column("Baths", "bathrooms", ColumnKind::Number),
    column("Sqft", "livingSqft", ColumnKind::Number),
    column("Year", "yearBuilt", ColumnKind::Number),
    column("Lot Sqft", "lotSizeSqft", ColumnKind::Number),
    column("Est. Value", "estimatedValue", ColumnKind::Currency),
    column("Last Sale Price", "lastSalePrice", ColumnKind::Currency),
    column("Lien Count", "lienCount", ColumnKind::Number),
    column("Open Lien Balance", "totalOpenLienBalance", ColumnKind::Currency),
];

impl Column {
    /// Display text for this column of `row`; empty when the value is missing.
    ///
    /// Values that do not fit the column kind are shown as sent.
    pub fn cell(&self, row: &ResultRow) -> String {
        let Some(value) = row.get(self.field) else {
            return String::new();
        };
        if self.kind != ColumnKind::Text {
            if let Some(n) = row.number(self.field) {
                return match self.kind {
                    ColumnKind::Currency => format_currency(n),
                    _ => format_number(n),
                };
            }
        }
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// `$1,234,568`, rounded to whole dollars.
fn format_currency(n: f64) -> String {
    let rounded = n.abs().round() as u64;
    let sign = if n < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{sign}${}", rounded.to_formatted_string(&Locale::en))
}

/// Render rows as a plain-text table with a header line.
pub fn render_table(rows: &[ResultRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| COLUMNS.iter().map(|c| c.cell(row)).collect())
        .collect();

    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.label.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = COLUMNS
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c.label, w = *w))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(COLUMNS.iter().zip(&widths))
            .map(|(cell, (c, w))| match c.kind {
                ColumnKind::Text => format!("{:<w$}", cell, w = *w),
                _ => format!("{:>w$}", cell, w = *w),
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ResultRow {
        ResultRow::new()
            .with("street", "1100 Congress Ave")
            .with("city", "Austin")
            .with("bathrooms", 2.5)
            .with("yearBuilt", 1998)
            .with("estimatedValue", 1_234_567.6)
    }

    #[test]
    fn column_order_matches_display() {
        let labels: Vec<&str> = COLUMNS.iter().map(|c| c.label).collect();
        assert_eq!(labels[0], "Street");
        assert_eq!(labels[6], "Sqft");
        assert_eq!(labels[12], "Open Lien Balance");
    }

    #[test]
    fn cells_format_by_kind() {
        let row = row();
        assert_eq!(COLUMNS[0].cell(&row), "1100 Congress Ave");
        assert_eq!(COLUMNS[5].cell(&row), "2.5");
        assert_eq!(COLUMNS[7].cell(&row), "1998");
        assert_eq!(COLUMNS[9].cell(&row), "$1,234,568");
        assert_eq!(COLUMNS[3].cell(&row), "");
        assert_eq!(COLUMNS[11].cell(&row), "");
    }

    #[test]
    fn loosely_typed_values_still_render() {
        let row = ResultRow::new()
            .with("zip", 78701)
            .with("yearBuilt", 1998.0)
            .with("lienCount", "2")
            .with("bathrooms", "n/a")
            .with("street", serde_json::Value::Null);
        assert_eq!(COLUMNS[3].cell(&row), "78701");
        assert_eq!(COLUMNS[7].cell(&row), "1998");
        assert_eq!(COLUMNS[11].cell(&row), "2");
        assert_eq!(COLUMNS[5].cell(&row), "n/a");
        assert_eq!(COLUMNS[0].cell(&row), "");
    }

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(-2500.4), "-$2,500");
    }

    #[test]
    fn table_has_header_and_one_line_per_row() {
        let table = render_table(&[row(), ResultRow::new()]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Street"));
        assert!(lines[1].contains("Austin"));
    }
}
