//! Paginated result aggregation for fetch-all searches
//!
//! The search endpoint is offset-paginated and the platform stops serving
//! records past a hard limit of 10,000 per query. This module drives the
//! page loop: issue page 1, learn the reported total, then walk the
//! remaining pages strictly sequentially. Pages cannot be prefetched in
//! parallel because the page count is unknown until page 1 resolves, and
//! every request consumes metered credits.

use std::future::Future;

use crate::prelude::*;
use dehash_core::pagination::{clamp_page_size, effective_total, page_count};
use dehash_core::search::{AggregationResult, SearchResponse};

/// Fetch every retrievable page of a query and concatenate the entries.
///
/// `fetch_page(page, size)` performs one search request; the query itself is
/// captured by the caller's closure. `progress(page_index, page_count,
/// entries_so_far)` is invoked after each fetched page; pass `|_, _, _| {}`
/// when no reporting is wanted.
///
/// The call is all-or-nothing: any page failure propagates unchanged and the
/// entries fetched so far are dropped, so a transport fault can never be
/// mistaken for a genuinely short result. Hitting the platform's hard limit
/// is not a failure; it is reported through `truncated` on the result.
///
/// A page that comes back empty before the reported total is reached ends
/// the aggregation normally. The server's `total` can disagree with what it
/// actually serves when the underlying data moves between requests, and the
/// entry count is the authoritative signal. Totals reported by pages after
/// the first are ignored for the same reason.
pub async fn fetch_all<F, Fut, P>(
    mut fetch_page: F,
    page_size: usize,
    mut progress: P,
) -> Result<AggregationResult, Error>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<SearchResponse, Error>>,
    P: FnMut(usize, usize, usize),
{
    let size = clamp_page_size(page_size);

    let first = fetch_page(1, size).await?;
    let total_reported = first.total;
    let effective = effective_total(total_reported as usize);

    let pages = page_count(effective, size);
    if pages == 0 {
        return Ok(AggregationResult::from_entries(Vec::new(), total_reported));
    }

    let mut entries = first.entries;
    progress(1, pages, entries.len());

    if entries.is_empty() {
        return Ok(AggregationResult::from_entries(entries, total_reported));
    }

    for page in 2..=pages {
        let response = fetch_page(page, size).await?;
        if response.entries.is_empty() {
            break;
        }
        entries.extend(response.entries);
        progress(page, pages, entries.len());
    }

    // An inconsistent server can over-deliver relative to the total it
    // reported on page 1; never hand back more than the effective total.
    entries.truncate(effective);

    Ok(AggregationResult::from_entries(entries, total_reported))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dehash_core::pagination::HARD_LIMIT;
    use dehash_core::search::Record;
    use std::cell::RefCell;

    fn records(count: usize) -> Vec<Record> {
        (0..count)
            .map(|i| {
                let mut record = Record::new();
                record.insert("id".to_string(), serde_json::Value::from(i as u64));
                record
            })
            .collect()
    }

    fn page_response(entries: usize, total: u64) -> SearchResponse {
        SearchResponse {
            entries: records(entries),
            total,
            balance: Some(100),
            took: None,
        }
    }

    /// Simulates a consistent backend holding `total` records.
    fn backend(
        total: u64,
        calls: &RefCell<Vec<(usize, usize)>>,
    ) -> impl FnMut(usize, usize) -> std::future::Ready<Result<SearchResponse, Error>> + '_ {
        move |page, size| {
            calls.borrow_mut().push((page, size));
            let offset = (page - 1) * size;
            let remaining = (total as usize).saturating_sub(offset);
            std::future::ready(Ok(page_response(remaining.min(size), total)))
        }
    }

    #[tokio::test]
    async fn test_total_below_limit_fetches_everything() {
        let calls = RefCell::new(Vec::new());

        let result = fetch_all(backend(2_500, &calls), 1_000, |_, _, _| {})
            .await
            .unwrap();

        assert_eq!(result.total_fetched, 2_500);
        assert_eq!(result.entries.len(), result.total_fetched);
        assert_eq!(result.total_reported, 2_500);
        assert!(!result.truncated);
        assert_eq!(
            *calls.borrow(),
            vec![(1, 1_000), (2, 1_000), (3, 1_000)],
            "three sequential page requests expected"
        );
    }

    #[tokio::test]
    async fn test_total_above_limit_is_truncated() {
        let calls = RefCell::new(Vec::new());

        let result = fetch_all(backend(15_000, &calls), 10_000, |_, _, _| {})
            .await
            .unwrap();

        assert_eq!(result.total_fetched, HARD_LIMIT);
        assert!(result.truncated);
        assert_eq!(result.total_reported, 15_000);
    }

    #[tokio::test]
    async fn test_clamped_total_needs_single_page() {
        // 35,000 reported matches collapse to one 10,000-record page.
        let calls = RefCell::new(Vec::new());

        let result = fetch_all(backend(35_000, &calls), 10_000, |_, _, _| {})
            .await
            .unwrap();

        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(result.total_fetched, 10_000);
        assert!(result.truncated);
    }

    #[tokio::test]
    async fn test_zero_total_issues_one_request() {
        let calls = RefCell::new(Vec::new());

        let result = fetch_all(backend(0, &calls), 1_000, |_, _, _| {})
            .await
            .unwrap();

        assert_eq!(calls.borrow().len(), 1);
        assert!(result.entries.is_empty());
        assert_eq!(result.total_fetched, 0);
        assert!(!result.truncated);
    }

    #[tokio::test]
    async fn test_empty_page_stops_aggregation_without_error() {
        // Server reports 2,500 but dries up after page 1.
        let calls = RefCell::new(Vec::new());
        let fetch = |page: usize, size: usize| {
            calls.borrow_mut().push((page, size));
            let entries = if page == 1 { 1_000 } else { 0 };
            std::future::ready(Ok(page_response(entries, 2_500)))
        };

        let result = fetch_all(fetch, 1_000, |_, _, _| {}).await.unwrap();

        assert_eq!(result.total_fetched, 1_000);
        assert!(result.total_fetched < 2_500);
        assert!(!result.truncated);
        assert_eq!(calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_first_page_with_nonzero_total() {
        let fetch = |_page: usize, _size: usize| {
            std::future::ready(Ok(page_response(0, 500)))
        };

        let result = fetch_all(fetch, 1_000, |_, _, _| {}).await.unwrap();

        assert_eq!(result.total_fetched, 0);
        assert_eq!(result.total_reported, 500);
    }

    #[tokio::test]
    async fn test_page_failure_aborts_whole_call() {
        let calls = RefCell::new(0usize);
        let fetch = |page: usize, _size: usize| {
            *calls.borrow_mut() += 1;
            std::future::ready(if page == 2 {
                Err(Error::Transport("connection reset".to_string()))
            } else {
                Ok(page_response(1_000, 3_000))
            })
        };

        let err = fetch_all(fetch, 1_000, |_, _, _| {}).await.unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(*calls.borrow(), 2, "no pages fetched past the failure");
    }

    #[tokio::test]
    async fn test_rate_limit_on_first_page_propagates() {
        let fetch = |_page: usize, _size: usize| {
            std::future::ready(Err::<SearchResponse, _>(Error::RateLimit(
                "quota exceeded".to_string(),
            )))
        };

        let err = fetch_all(fetch, 1_000, |_, _, _| {}).await.unwrap_err();

        assert!(matches!(err, Error::RateLimit(_)));
    }

    #[tokio::test]
    async fn test_progress_reported_after_each_page() {
        let calls = RefCell::new(Vec::new());
        let progress = RefCell::new(Vec::new());

        fetch_all(backend(2_500, &calls), 1_000, |page, pages, fetched| {
            progress.borrow_mut().push((page, pages, fetched));
        })
        .await
        .unwrap();

        assert_eq!(
            *progress.borrow(),
            vec![(1, 3, 1_000), (2, 3, 2_000), (3, 3, 2_500)]
        );
    }

    #[tokio::test]
    async fn test_oversized_page_size_is_clamped() {
        let calls = RefCell::new(Vec::new());

        fetch_all(backend(100, &calls), 50_000, |_, _, _| {})
            .await
            .unwrap();

        assert_eq!(*calls.borrow(), vec![(1, 10_000)]);
    }

    #[tokio::test]
    async fn test_zero_page_size_is_clamped_to_one() {
        let calls = RefCell::new(Vec::new());

        let result = fetch_all(backend(2, &calls), 0, |_, _, _| {}).await.unwrap();

        assert_eq!(result.total_fetched, 2);
        assert_eq!(*calls.borrow(), vec![(1, 1), (2, 1)]);
    }

    #[tokio::test]
    async fn test_over_delivering_server_never_exceeds_reported_total() {
        // Every page returns a full 1,000 records even though the server
        // reported only 1,500 matches.
        let fetch = |_page: usize, _size: usize| {
            std::future::ready(Ok(page_response(1_000, 1_500)))
        };

        let result = fetch_all(fetch, 1_000, |_, _, _| {}).await.unwrap();

        assert_eq!(result.total_fetched, 1_500);
        assert_eq!(result.entries.len(), 1_500);
    }

    #[tokio::test]
    async fn test_entries_preserve_page_order() {
        let fetch = |page: usize, _size: usize| {
            let mut record = Record::new();
            record.insert("page".to_string(), serde_json::Value::from(page as u64));
            std::future::ready(Ok(SearchResponse {
                entries: vec![record],
                total: 3,
                balance: None,
                took: None,
            }))
        };

        let result = fetch_all(fetch, 1, |_, _, _| {}).await.unwrap();

        let pages: Vec<u64> = result
            .entries
            .iter()
            .map(|r| r["page"].as_u64().unwrap())
            .collect();
        assert_eq!(pages, vec![1, 2, 3]);
    }
}
