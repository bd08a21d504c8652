use crate::client::{DehashedClient, DehashedConfig};
use crate::output::{detect_format, save_csv, save_json, OutputFormat};
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

pub mod fetch_all;

pub use fetch_all::fetch_all;

use dehash_core::search::{Record, SearchRequest, SearchResponse};

/// Options for searching breach records
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Search for an email address:
  dehash search \"email:user@example.com\"

  # Search with wildcard matching:
  dehash search \"username:admin*\" --wildcard

  # Fetch one specific page:
  dehash search \"domain:example.com\" --page 2 --size 100

  # Fetch every retrievable page (up to the platform's 10,000-record limit):
  dehash search \"domain:example.com\" --all

  # Save results to CSV (format inferred from extension):
  dehash search \"domain:example.com\" --output results.csv

  # Save results to JSON explicitly:
  dehash search \"domain:example.com\" --output results.dat --format json

NOTES:
  - Queries use the field:value syntax (email:, username:, domain:, ip_address:, ...)
  - The API never serves more than 10,000 records per query; --all reports
    truncation when more matches exist
  - Every page request consumes account credits; password hash searches are free")]
pub struct SearchOptions {
    /// Search query in field:value syntax (e.g., "email:user@example.com")
    #[clap(env = "DEHASHED_QUERY")]
    pub query: String,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Results per page (capped at 10,000 by the API)
    #[arg(short, long, default_value = "10000")]
    pub size: usize,

    /// Enable wildcard matching
    #[arg(long)]
    pub wildcard: bool,

    /// Enable regex matching
    #[arg(long)]
    pub regex: bool,

    /// Remove duplicate entries server-side
    #[arg(long)]
    pub dedupe: bool,

    /// Fetch all pages up to the platform's 10,000-record limit
    #[arg(long)]
    pub all: bool,

    /// Save results to a file instead of printing them
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output file format (default: inferred from the file extension)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for searching records by password hash
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct PasswordOptions {
    /// Password hash to search for
    pub hash: String,

    /// Save results to a file instead of printing them
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output file format (default: inferred from the file extension)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle the search command
pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    if options.query.trim().is_empty() {
        return Err(eyre!("Search query must not be empty"));
    }

    let config = DehashedConfig::from_global(&global)?;
    let client = DehashedClient::new(&config)?;

    if global.verbose {
        println!("DeHashed API Base: {}", config.base_url);
        println!();
    }

    if options.all {
        return run_fetch_all(&client, options).await;
    }

    let request = SearchRequest {
        query: options.query.clone(),
        page: options.page,
        size: options.size,
        wildcard: options.wildcard,
        regex: options.regex,
        de_dupe: options.dedupe,
    };

    let response = client.search(&request).await?;

    if let Some(ref path) = options.output {
        return match detect_format(path, options.format) {
            OutputFormat::Csv => save_csv(&response.entries, path),
            OutputFormat::Json => save_json(&response, path),
        };
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    print_entries(&response.entries);
    println!("\n{}", format_search_summary(response.total, response.entries.len(), response.balance));
    Ok(())
}

/// Fetch every retrievable page and report truncation against the hard limit.
async fn run_fetch_all(client: &DehashedClient, options: SearchOptions) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner.set_message(f!("Searching \"{}\"...", options.query));

    let result = fetch_all(
        |page, size| {
            let request = SearchRequest {
                query: options.query.clone(),
                page,
                size,
                wildcard: options.wildcard,
                regex: options.regex,
                de_dupe: options.dedupe,
            };
            let client = &client;
            async move { client.search(&request).await }
        },
        options.size,
        |page, pages, fetched| {
            spinner.set_message(f!("Fetched page {page}/{pages} ({fetched} records)"));
        },
    )
    .await?;

    spinner.finish_and_clear();

    if result.truncated {
        eprintln!(
            "{}",
            f!(
                "Warning: query matched {} records but the API only serves the first {}.",
                result.total_reported,
                result.total_fetched
            )
            .yellow()
            .bold()
        );
    }

    if let Some(ref path) = options.output {
        return match detect_format(path, options.format) {
            OutputFormat::Csv => save_csv(&result.entries, path),
            OutputFormat::Json => save_json(&result, path),
        };
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_entries(&result.entries);
    println!(
        "\nFetched {} of {} reported record(s).",
        result.total_fetched, result.total_reported
    );
    Ok(())
}

/// Handle the search-password command
pub async fn run_password(options: PasswordOptions, global: crate::Global) -> Result<()> {
    let config = DehashedConfig::from_global(&global)?;
    let client = DehashedClient::new(&config)?;

    let response = client.search_password(&options.hash).await?;

    if let Some(ref path) = options.output {
        return match detect_format(path, options.format) {
            OutputFormat::Csv => save_csv(&response.entries, path),
            OutputFormat::Json => save_json(&response, path),
        };
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    print_entries(&response.entries);
    println!("\n{}", format_search_summary(response.total, response.entries.len(), response.balance));
    Ok(())
}

/// Columns shown in the human-readable table. Records are opaque maps, so
/// any field a record does not carry renders empty.
const TABLE_FIELDS: &[&str] = &["id", "database_name", "email", "username", "password"];

fn print_entries(entries: &[Record]) {
    if entries.is_empty() {
        println!("No records found.");
        return;
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Id", "Database", "Email", "Username", "Password"]);

    for entry in entries {
        let cells: Vec<prettytable::Cell> = TABLE_FIELDS
            .iter()
            .map(|field| prettytable::Cell::new(&field_text(entry, field)))
            .collect();
        table.add_row(prettytable::Row::new(cells));
    }

    table.printstd();
}

/// Render one opaque record field as table text.
fn field_text(record: &Record, field: &str) -> String {
    match record.get(field) {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
    }
}

fn format_search_summary(total: u64, shown: usize, balance: Option<u64>) -> String {
    let mut summary = f!("Showing {shown} of {total} record(s).");
    if let Some(balance) = balance {
        summary.push_str(&f!(" Balance: {balance} credits."));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_field_text_string() {
        let entry = record(json!({"email": "a@example.com"}));

        assert_eq!(field_text(&entry, "email"), "a@example.com");
    }

    #[test]
    fn test_field_text_missing_or_null() {
        let entry = record(json!({"phone": null}));

        assert_eq!(field_text(&entry, "phone"), "");
        assert_eq!(field_text(&entry, "email"), "");
    }

    #[test]
    fn test_field_text_joins_arrays() {
        let entry = record(json!({"password": ["hunter2", "hunter3"]}));

        assert_eq!(field_text(&entry, "password"), "hunter2; hunter3");
    }

    #[test]
    fn test_field_text_numbers() {
        let entry = record(json!({"id": 42}));

        assert_eq!(field_text(&entry, "id"), "42");
    }

    #[test]
    fn test_format_search_summary_with_balance() {
        let summary = format_search_summary(2_500, 100, Some(95));

        assert_eq!(summary, "Showing 100 of 2500 record(s). Balance: 95 credits.");
    }

    #[test]
    fn test_format_search_summary_without_balance() {
        let summary = format_search_summary(0, 0, None);

        assert_eq!(summary, "Showing 0 of 0 record(s).");
    }
}
