// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tap-getresponse
//!
//! A Singer tap for the GetResponse v3 REST API.
//!
//! Streams are described declaratively by [`StreamDescriptor`]s collected in
//! a [`StreamRegistry`]. A child stream's path is rendered from context that
//! its parent's records supply, so one sync walks whole forests:
//! `contacts` → `contact_details`, `contact_activities` and so on.
//!
//! ## Features
//!
//! - **Header pagination**: `CurrentPage` / `TotalPages` drive `page=N` requests
//! - **Parent/child traversal**: children run right after each parent record
//! - **Context injection**: child records carry their parent's identifiers
//! - **Singer output**: `SCHEMA`, `RECORD` and `STATE` messages on stdout
//! - **Bookmarks**: replication-key state persisted between runs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tap_getresponse::{default_registry, HttpClient, SingerWriter, SyncEngine, TapConfig};
//!
//! #[tokio::main]
//! async fn main() -> tap_getresponse::Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let client = HttpClient::with_config(config.http_config())?;
//!     let registry = default_registry()?;
//!     let selection = registry.select(&["contact_activities"])?;
//!
//!     let mut engine = SyncEngine::new(Arc::new(client), Arc::new(registry), config.sync_config())?;
//!     let report = engine.sync(&selection, &mut SingerWriter::stdout()).await;
//!     assert!(report.is_success());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 CLI: about / discover / check / read         │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │      SyncEngine: forests, selection, interleaved children    │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴────┬────────────┬─────────────┐
//! │ Request  │   HTTP    │ Pagination │   Decode   │   Output    │
//! ├──────────┼───────────┼────────────┼────────────┼─────────────┤
//! │ Template │ reqwest   │ CurrentPage│ Array      │ SCHEMA      │
//! │ perPage  │ API key   │ TotalPages │ Object     │ RECORD      │
//! │ page     │ timeout   │ strict mode│ Wrapped    │ STATE       │
//! └──────────┴───────────┴────────────┴────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// API key authentication
pub mod auth;

/// HTTP transport
pub mod http;

/// Header-driven pagination
pub mod pagination;

/// Response body parsing
pub mod decode;

/// Bookmarks and state persistence
pub mod state;

/// Singer message output
pub mod output;

/// Forest traversal engine
pub mod engine;

/// Tap configuration
pub mod config;

/// Stream context passed from parent to child
pub mod context;

/// Path template rendering
pub mod template;

/// Request construction
pub mod request;

/// JSON schema types and field builders
pub mod schema;

/// Stream descriptors and registry
pub mod stream;

/// The GetResponse stream catalog
pub mod streams;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::TapConfig;
pub use context::StreamContext;
pub use engine::{SyncConfig, SyncEngine, SyncReport, SyncStats};
pub use http::{HttpClient, HttpClientConfig, HttpResponse, HttpTransport};
pub use output::{CollectingSink, RecordSink, SingerMessage, SingerWriter};
pub use state::StateManager;
pub use stream::{StreamDescriptor, StreamRegistry};
pub use streams::default_registry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
