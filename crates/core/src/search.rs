//! Search response models and aggregation results
//!
//! Records returned by the search endpoint are treated as opaque key/value
//! maps: field names vary per breach database and the core never assumes or
//! validates a record shape. Only entry counts and order matter here.

use serde::{Deserialize, Serialize};

use crate::pagination::HARD_LIMIT;

/// One breach record as returned by the API. Shape is database-dependent.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Body of a POST /search request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub page: usize,
    pub size: usize,
    pub wildcard: bool,
    pub regex: bool,
    pub de_dupe: bool,
}

/// One page of search results from the API.
///
/// `entries` is null (not an empty array) when a page has no results, so it
/// deserializes through an Option and defaults to empty.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_to_empty")]
    pub entries: Vec<Record>,
    pub total: u64,
    pub balance: Option<u64>,
    pub took: Option<String>,
}

fn null_to_empty<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<Vec<Record>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Result of aggregating every retrievable page of a query.
///
/// Entries are concatenated in page order, then in-page order. `truncated` is
/// set when the query matched more records than the platform's hard limit
/// allows retrieving; that is a successful partial outcome, not an error.
#[derive(Debug, Serialize, Clone)]
pub struct AggregationResult {
    pub entries: Vec<Record>,
    pub total_reported: u64,
    pub total_fetched: usize,
    pub truncated: bool,
}

impl AggregationResult {
    /// Build a result from accumulated entries and the first page's reported total.
    pub fn from_entries(entries: Vec<Record>, total_reported: u64) -> Self {
        let total_fetched = entries.len();
        Self {
            entries,
            total_reported,
            total_fetched,
            truncated: total_reported > HARD_LIMIT as u64,
        }
    }

    /// An empty result for a query that matched nothing.
    pub fn empty() -> Self {
        Self::from_entries(Vec::new(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect()
    }

    #[test]
    fn test_search_response_deserializes_entries() {
        let body = r#"{
            "entries": [
                {"id": "1", "email": "a@example.com", "database_name": "breach-a"},
                {"id": "2", "username": "admin", "database_name": "breach-b"}
            ],
            "total": 2,
            "balance": 95,
            "took": "12ms"
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.entries.len(), 2);
        assert_eq!(response.total, 2);
        assert_eq!(response.balance, Some(95));
        assert_eq!(response.entries[0]["email"], "a@example.com");
    }

    #[test]
    fn test_search_response_null_entries() {
        let body = r#"{"entries": null, "total": 0, "balance": 100}"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();

        assert!(response.entries.is_empty());
        assert_eq!(response.total, 0);
    }

    #[test]
    fn test_search_response_missing_entries() {
        let body = r#"{"total": 0}"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();

        assert!(response.entries.is_empty());
        assert_eq!(response.balance, None);
    }

    #[test]
    fn test_search_response_missing_total_is_an_error() {
        let body = r#"{"entries": []}"#;

        assert!(serde_json::from_str::<SearchResponse>(body).is_err());
    }

    #[test]
    fn test_aggregation_result_counts_entries() {
        let entries = vec![record(&[("id", "1")]), record(&[("id", "2")])];

        let result = AggregationResult::from_entries(entries, 2);

        assert_eq!(result.total_fetched, 2);
        assert_eq!(result.entries.len(), result.total_fetched);
        assert!(!result.truncated);
    }

    #[test]
    fn test_aggregation_result_truncated_above_hard_limit() {
        let result = AggregationResult::from_entries(Vec::new(), 15_000);

        assert!(result.truncated);
        assert_eq!(result.total_reported, 15_000);
    }

    #[test]
    fn test_aggregation_result_not_truncated_at_hard_limit() {
        let result = AggregationResult::from_entries(Vec::new(), 10_000);

        assert!(!result.truncated);
    }

    #[test]
    fn test_aggregation_result_empty() {
        let result = AggregationResult::empty();

        assert!(result.entries.is_empty());
        assert_eq!(result.total_reported, 0);
        assert_eq!(result.total_fetched, 0);
        assert!(!result.truncated);
    }

    #[test]
    fn test_search_request_serializes_all_fields() {
        let request = SearchRequest {
            query: "domain:example.com".to_string(),
            page: 2,
            size: 100,
            wildcard: false,
            regex: true,
            de_dupe: false,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["query"], "domain:example.com");
        assert_eq!(json["page"], 2);
        assert_eq!(json["size"], 100);
        assert_eq!(json["regex"], true);
        assert_eq!(json["de_dupe"], false);
    }
}
