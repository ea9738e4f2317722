//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::error::Result;
use reqwest::header::HeaderMap;

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available; request this page number next
    Continue(u32),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }

    /// The page token to send next, if any
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Continue(page) => Some(*page),
            Self::Done => None,
        }
    }
}

/// What to do when a response carries no pagination headers at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingHeaders {
    /// Treat the response as the last page
    #[default]
    Stop,
    /// Stop on the first page, fail on any later page
    FailAfterFirstPage,
}

/// Tracks pagination for one (stream, context) traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Page number of the request in flight (starts at 1)
    pub current_page: u32,
    /// Whether another request should be issued
    pub has_more: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            has_more: true,
        }
    }
}

impl PaginationState {
    /// Create a new pagination state at page 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the given page
    pub fn advance(&mut self, page: u32) {
        self.current_page = page;
    }

    /// Mark pagination as complete
    pub fn finish(&mut self) {
        self.has_more = false;
    }

    /// True for the first request of a traversal
    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Process the headers of the page just fetched and decide what comes next
    ///
    /// Implementations update `state` to match the returned [`NextPage`].
    fn process_response(&self, headers: &HeaderMap, state: &mut PaginationState)
        -> Result<NextPage>;
}
