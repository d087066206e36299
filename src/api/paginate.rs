//! Offset-based pagination.
//!
//! Both strategies drive a caller-supplied page fetcher strictly in sequence:
//! the offset of page N+1 depends on how many items page N returned, so no
//! page is requested before the previous one has completed. Items are
//! accumulated in the order the server returned them.

use std::future::Future;

use tracing::{debug, trace, warn};

use super::error::Result;

/// Page size used by the core search API (its documented maximum).
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// Page size used by the agile API (its documented maximum).
pub const AGILE_PAGE_SIZE: u32 = 50;

/// Page size for the core API's `values` listings (issue type schemes).
pub const VALUES_PAGE_SIZE: u32 = 50;

/// The window requested for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based index of the first item (`startAt`).
    pub start_at: u32,
    /// Number of items requested (`maxResults`).
    pub max_results: u32,
}

/// Fetch every page until the server returns a short page.
///
/// A result count that is an exact multiple of `page_size` costs one extra
/// request, which comes back empty. Paging also stops once the next offset
/// would not fit in a `u32`.
///
/// # Errors
///
/// The first failing page aborts the loop and its error is returned; items
/// collected so far are discarded.
pub async fn collect_all<T, F, Fut>(page_size: u32, start_at: u32, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let page_size = page_size.max(1);
    let mut items = Vec::new();
    let mut offset = start_at;

    loop {
        let page = fetch(PageRequest {
            start_at: offset,
            max_results: page_size,
        })
        .await?;
        let returned = page.len();
        trace!(offset, returned, "Fetched page");
        items.extend(page);

        if returned < page_size as usize {
            break;
        }
        match offset.checked_add(page_size) {
            Some(next) => offset = next,
            None => {
                warn!(offset, "Offset range exhausted, stopping pagination");
                break;
            }
        }
    }

    debug!(total = items.len(), "Pagination complete");
    Ok(items)
}

/// Fetch pages until `max_total` items are collected or the server runs out.
///
/// Each page asks for `min(page_size, remaining)` items. Items a server
/// returns beyond what was still needed are dropped, so the result never
/// exceeds `max_total`.
///
/// # Errors
///
/// As for [`collect_all`].
pub async fn collect_up_to<T, F, Fut>(
    max_total: u32,
    page_size: u32,
    start_at: u32,
    mut fetch: F,
) -> Result<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let page_size = page_size.max(1);
    let mut items = Vec::new();
    let mut remaining = max_total;
    let mut offset = start_at;

    while remaining > 0 {
        let requested = page_size.min(remaining);
        let mut page = fetch(PageRequest {
            start_at: offset,
            max_results: requested,
        })
        .await?;
        let returned = page.len();
        trace!(offset, requested, returned, "Fetched page");

        page.truncate(remaining as usize);
        remaining -= page.len() as u32;
        items.extend(page);

        if returned < requested as usize {
            break;
        }
        match offset.checked_add(requested) {
            Some(next) => offset = next,
            None => {
                warn!(offset, "Offset range exhausted, stopping pagination");
                break;
            }
        }
    }

    debug!(total = items.len(), max_total, "Pagination complete");
    Ok(items)
}
