//! Pagination module
//!
//! Supports: response-header page counters (GetResponse), single request
//!
//! # Overview
//!
//! A paginator inspects the response of the page just requested and decides
//! whether another page exists and which page number to ask for next. Page
//! numbers are 1-based; there is no page 0.

mod strategies;
mod types;

pub use strategies::{HeaderPaginator, NoPaginator, CURRENT_PAGE_HEADER, TOTAL_PAGES_HEADER};
pub use types::{MissingHeaders, NextPage, PaginationState, Paginator};
