//! Result persistence helpers shared by the search commands
//!
//! Results go to a file as JSON or CSV. When the user does not pick a format
//! explicitly, it is inferred from the output path's extension, defaulting
//! to JSON.

use std::path::Path;

use crate::prelude::{println, *};
use dehash_core::export;
use dehash_core::search::Record;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
pub enum OutputFormat {
    Json,
    Csv,
}

/// Pick the output format: an explicit --format wins, otherwise the file
/// extension decides.
pub fn detect_format(path: &str, explicit: Option<OutputFormat>) -> OutputFormat {
    if let Some(format) = explicit {
        return format;
    }

    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => OutputFormat::Csv,
        _ => OutputFormat::Json,
    }
}

/// Write a response to a file as pretty JSON.
pub fn save_json<T: serde::Serialize>(value: &T, path: &str) -> Result<()> {
    let json = export::to_pretty_json(value).map_err(|e| eyre!("{}", e))?;
    std::fs::write(path, json).map_err(|e| eyre!("Failed to write {}: {}", path, e))?;
    println!("Results saved to {}", path);
    Ok(())
}

/// Write search records to a file as CSV.
pub fn save_csv(records: &[Record], path: &str) -> Result<()> {
    if records.is_empty() {
        println!("No entries found in results to export to CSV");
        return Ok(());
    }

    let csv = export::records_to_csv(records);
    std::fs::write(path, csv).map_err(|e| eyre!("Failed to write {}: {}", path, e))?;
    println!("Results saved to {}", path);
    println!("Total entries exported: {}", records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_format_explicit_wins() {
        assert_eq!(
            detect_format("results.csv", Some(OutputFormat::Json)),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_detect_format_from_extension() {
        assert_eq!(detect_format("results.csv", None), OutputFormat::Csv);
        assert_eq!(detect_format("results.CSV", None), OutputFormat::Csv);
        assert_eq!(detect_format("results.json", None), OutputFormat::Json);
    }

    #[test]
    fn test_detect_format_defaults_to_json() {
        assert_eq!(detect_format("results", None), OutputFormat::Json);
        assert_eq!(detect_format("results.txt", None), OutputFormat::Json);
    }

    #[test]
    fn test_save_json_writes_pretty_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let path_str = path.to_str().unwrap();

        save_json(&json!({"total": 2}), path_str).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"total\": 2"));
    }

    #[test]
    fn test_save_csv_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let path_str = path.to_str().unwrap();

        let record = json!({"id": "1", "email": "a@example.com"})
            .as_object()
            .unwrap()
            .clone();

        save_csv(&[record], path_str).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("id,database_name,email\n"));
        assert!(written.contains("1,,a@example.com"));
    }

    #[test]
    fn test_save_csv_skips_empty_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        save_csv(&[], path.to_str().unwrap()).unwrap();

        assert!(!path.exists());
    }
}
