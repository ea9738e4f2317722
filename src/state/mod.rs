//! State management module
//!
//! Tracks replication bookmarks between runs. The serialized form is the
//! Singer state document:
//!
//! ```json
//! {"bookmarks": {"campaigns": {"replication_key": "createdOn", "replication_key_value": "2024-01-01"}}}
//! ```
//!
//! Bookmarks are recorded and persisted, and a loaded value is only ever
//! advanced. Requests are not filtered by them: every sync is a full read,
//! and the built-in GetResponse catalog declares no replication key, so its
//! state stays `{"bookmarks": {}}`.

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{compare_replication_values, Bookmark, State};
