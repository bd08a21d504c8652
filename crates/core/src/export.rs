//! JSON and CSV serialization of search results
//!
//! Pure functions that turn API responses into exportable text. CSV export
//! flattens the opaque records: the header is the union of every field name
//! seen across all entries, with `id` and `database_name` pinned first and
//! `raw_record` pinned last for readability.

use serde::Serialize;

use crate::search::Record;

/// Error type for export operations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize any response value to pretty-printed JSON.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render records as a CSV document, header included.
///
/// Array values are joined with `"; "`, nested objects are embedded as JSON
/// text, and missing fields are left empty. Returns an empty string when
/// there are no records, since there is no header to derive.
pub fn records_to_csv(records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let fields = collect_field_names(records);

    let mut out = String::new();
    out.push_str(&csv_row(fields.iter().map(String::as_str)));

    for record in records {
        let row = fields.iter().map(|field| {
            record
                .get(field)
                .map(flatten_value)
                .unwrap_or_default()
        });
        out.push_str(&csv_row_owned(row));
    }

    out
}

/// Union of field names across all records, in export order.
fn collect_field_names(records: &[Record]) -> Vec<String> {
    let priority = ["id", "database_name"];

    let mut names: Vec<String> = records
        .iter()
        .flat_map(|record| record.keys().cloned())
        .collect();
    names.sort();
    names.dedup();

    let has_raw_record = names.iter().any(|n| n == "raw_record");

    let mut ordered: Vec<String> = priority.iter().map(|s| s.to_string()).collect();
    ordered.extend(
        names
            .into_iter()
            .filter(|n| !priority.contains(&n.as_str()) && n != "raw_record"),
    );
    if has_raw_record {
        ordered.push("raw_record".to_string());
    }

    ordered
}

/// Flatten a JSON value into a single CSV cell.
fn flatten_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .collect::<Vec<_>>()
            .join("; "),
        serde_json::Value::Object(_) => value.to_string(),
        other => other.to_string(),
    }
}

fn csv_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    csv_row_owned(cells.map(|s| s.to_string()))
}

fn csv_row_owned(cells: impl Iterator<Item = String>) -> String {
    let mut row = cells.map(|c| csv_escape(&c)).collect::<Vec<_>>().join(",");
    row.push('\n');
    row
}

/// Quote a cell when it contains a comma, quote, or line break (RFC 4180).
fn csv_escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
