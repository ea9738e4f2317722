//! Pagination strategy implementations

use super::types::{MissingHeaders, NextPage, PaginationState, Paginator};
use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use tracing::debug;

/// Header carrying the page number the server answered with
pub const CURRENT_PAGE_HEADER: &str = "CurrentPage";

/// Header carrying the total number of pages
pub const TOTAL_PAGES_HEADER: &str = "TotalPages";

// ============================================================================
// Header Pagination
// ============================================================================

/// Page counters in response headers (GetResponse)
///
/// Reads `CurrentPage` and `TotalPages`:
/// - both present: continue with `CurrentPage + 1` while `CurrentPage < TotalPages`
/// - both absent: the resource is not paginated, stop
/// - unparseable, or only one of the two present: error
#[derive(Debug, Clone, Default)]
pub struct HeaderPaginator {
    missing: MissingHeaders,
}

impl HeaderPaginator {
    /// Create a paginator for the default `CurrentPage`/`TotalPages` headers
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy for responses without pagination headers
    #[must_use]
    pub fn with_missing_headers(mut self, policy: MissingHeaders) -> Self {
        self.missing = policy;
        self
    }
}

impl Paginator for HeaderPaginator {
    fn process_response(
        &self,
        headers: &HeaderMap,
        state: &mut PaginationState,
    ) -> Result<NextPage> {
        let current = read_page_header(headers, CURRENT_PAGE_HEADER)?;
        let total = read_page_header(headers, TOTAL_PAGES_HEADER)?;

        match (current, total) {
            (Some(current), Some(total)) => {
                debug!(current, total, "pagination headers");
                if current >= total {
                    state.finish();
                    return Ok(NextPage::Done);
                }

                let next = current + 1;
                if next <= state.current_page {
                    // The server keeps answering with an earlier page.
                    return Err(Error::pagination_header(
                        CURRENT_PAGE_HEADER,
                        current.to_string(),
                    ));
                }

                state.advance(next);
                Ok(NextPage::Continue(next))
            }
            (None, None) => {
                if self.missing == MissingHeaders::FailAfterFirstPage && !state.is_first_page() {
                    return Err(Error::MissingPaginationHeaders {
                        page: state.current_page,
                    });
                }
                state.finish();
                Ok(NextPage::Done)
            }
            (Some(_), None) => Err(Error::pagination_header(TOTAL_PAGES_HEADER, "<missing>")),
            (None, Some(_)) => Err(Error::pagination_header(CURRENT_PAGE_HEADER, "<missing>")),
        }
    }
}

/// Read a page counter; `Ok(None)` when the header is absent
///
/// `TotalPages: 0` is what an empty collection reports, so zero parses like
/// any other number.
fn read_page_header(headers: &HeaderMap, name: &str) -> Result<Option<u32>> {
    let Some(raw) = headers.get(name) else {
        return Ok(None);
    };

    let text = raw
        .to_str()
        .map_err(|_| Error::pagination_header(name, String::from_utf8_lossy(raw.as_bytes())))?;

    text.trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|_| Error::pagination_header(name, text))
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn process_response(
        &self,
        _headers: &HeaderMap,
        state: &mut PaginationState,
    ) -> Result<NextPage> {
        state.finish();
        Ok(NextPage::Done)
    }
}
