//! Page-count math for search result aggregation
//!
//! Pure functions shared by the fetch-all aggregation loop in the `dehash`
//! binary. The DeHashed platform enforces a hard ceiling of 10,000 retrievable
//! records per logical query, regardless of how many pages are requested, and
//! caps individual pages at 10,000 records.

/// Maximum number of records the platform returns for a single query.
pub const HARD_LIMIT: usize = 10_000;

/// Maximum number of records per page accepted by the search endpoint.
pub const MAX_PAGE_SIZE: usize = 10_000;

/// Clamp a requested page size to the range the API accepts (1..=10,000).
pub fn clamp_page_size(size: usize) -> usize {
    size.clamp(1, MAX_PAGE_SIZE)
}

/// Number of records actually retrievable for a query that reported `total` matches.
pub fn effective_total(total_reported: usize) -> usize {
    total_reported.min(HARD_LIMIT)
}

/// Number of pages needed to cover `effective_total` records at `page_size` per page.
///
/// `page_size` must already be clamped; a zero effective total yields zero pages.
pub fn page_count(effective_total: usize, page_size: usize) -> usize {
    effective_total.div_ceil(page_size)
}
