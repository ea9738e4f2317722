//! Execution engine module
//!
//! Walks stream forests: pages through each (stream, context) pair, parses
//! and post-processes records, emits them and recurses into child streams.
//!
//! # Ordering
//!
//! Records are emitted in page order, then in array order within a page.
//! The children of a record are traversed right after that record is
//! emitted, before the next record of the same page and before the parent's
//! next page is requested. Requests are strictly sequential.
//!
//! # Selection
//!
//! Only selected streams reach the sink. An unselected stream is still
//! traversed when one of its descendants is selected, because its records
//! provide the descendants' context.

mod types;

pub use types::{SyncConfig, SyncReport, SyncStats, DEFAULT_BASE_URL};

use crate::context::{extract_path, StreamContext};
use crate::decode;
use crate::error::{Error, Result};
use crate::http::HttpTransport;
use crate::output::RecordSink;
use crate::pagination::{HeaderPaginator, MissingHeaders, NoPaginator, PaginationState, Paginator};
use crate::request::RequestBuilder;
use crate::state::StateManager;
use crate::stream::{StreamDescriptor, StreamRegistry};
use futures::future::BoxFuture;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Longest response body quoted in an HTTP status error
const MAX_ERROR_BODY: usize = 512;

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    transport: Arc<dyn HttpTransport>,
    registry: Arc<StreamRegistry>,
    requests: RequestBuilder,
    config: SyncConfig,
    state: StateManager,
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine with in-memory state
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        registry: Arc<StreamRegistry>,
        config: SyncConfig,
    ) -> Result<Self> {
        let requests = RequestBuilder::new(&config.base_url, config.per_page)?;
        Ok(Self {
            transport,
            registry,
            requests,
            config,
            state: StateManager::in_memory(),
            stats: SyncStats::default(),
        })
    }

    /// Use the given state manager for bookmarks
    #[must_use]
    pub fn with_state(mut self, state: StateManager) -> Self {
        self.state = state;
        self
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync every forest that contains a selected stream
    ///
    /// A failing forest is logged and recorded in the report; the remaining
    /// forests still run.
    pub async fn sync(
        &mut self,
        selection: &BTreeSet<String>,
        sink: &mut dyn RecordSink,
    ) -> SyncReport {
        let start = Instant::now();
        let mut report = SyncReport::default();

        let roots: Vec<String> = self
            .registry
            .roots()
            .filter(|root| self.registry.subtree_selected(root.name(), selection))
            .map(|root| root.name().to_string())
            .collect();

        for root in roots {
            match self.sync_forest(&root, selection, sink).await {
                Ok(()) => report.completed.push(root),
                Err(e) => {
                    error!(stream = %root, kind = ?e.kind(), error = %e, "stream sync failed");
                    self.stats.add_error();
                    report.failed.push((root, e));
                }
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        self.stats.set_duration(start.elapsed().as_millis() as u64);
        report
    }

    /// Sync one stream and whatever ancestors it needs
    pub async fn sync_stream(&mut self, name: &str, sink: &mut dyn RecordSink) -> Result<()> {
        let selection = BTreeSet::from([name.to_string()]);
        let root = self.registry.root_of(name)?;
        self.sync_forest(&root, &selection, sink).await
    }

    /// Sync the forest rooted at `root`
    ///
    /// Writes a schema for every selected stream of the forest, traverses it
    /// and finishes with a state message.
    pub async fn sync_forest(
        &mut self,
        root: &str,
        selection: &BTreeSet<String>,
        sink: &mut dyn RecordSink,
    ) -> Result<()> {
        let descriptor = Arc::clone(self.registry.require(root)?);
        if !descriptor.is_root() {
            return Err(Error::config(format!("stream '{root}' is not a root stream")));
        }

        info!(stream = %root, "Starting sync");
        let before = self.stats.records_synced();
        let pages_before = self.stats.pages_fetched;

        let forest = self.forest(root);
        for stream in forest.iter().filter(|s| selection.contains(s.name())) {
            sink.write_schema(stream)?;
        }

        self.traverse(descriptor, StreamContext::new(), selection, sink)
            .await?;

        sink.write_state(self.state.to_value().await?)?;
        sink.flush()?;
        self.state.save().await?;
        self.stats.add_forest();

        info!(
            stream = %root,
            records = self.stats.records_synced() - before,
            pages = self.stats.pages_fetched - pages_before,
            "Completed sync"
        );
        Ok(())
    }

    /// `root` followed by its descendants, depth first in registration order
    fn forest(&self, root: &str) -> Vec<Arc<StreamDescriptor>> {
        let mut out = Vec::new();
        let mut pending = vec![root.to_string()];
        while let Some(name) = pending.pop() {
            if let Some(stream) = self.registry.get(&name) {
                out.push(Arc::clone(stream));
            }
            let children: Vec<String> = self
                .registry
                .children_of(&name)
                .map(|child| child.name().to_string())
                .collect();
            pending.extend(children.into_iter().rev());
        }
        out
    }

    fn paginator_for(&self, descriptor: &StreamDescriptor) -> Box<dyn Paginator> {
        if !descriptor.record_shape().is_paged() {
            return Box::new(NoPaginator);
        }
        let missing = if self.config.strict_pagination {
            MissingHeaders::FailAfterFirstPage
        } else {
            MissingHeaders::Stop
        };
        Box::new(HeaderPaginator::new().with_missing_headers(missing))
    }

    /// Traverse one (stream, context) pair and, per record, its children
    pub fn traverse<'a>(
        &'a mut self,
        descriptor: Arc<StreamDescriptor>,
        context: StreamContext,
        selection: &'a BTreeSet<String>,
        sink: &'a mut dyn RecordSink,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let name = descriptor.name();
            let emit = selection.contains(name);
            let children: Vec<Arc<StreamDescriptor>> = self
                .registry
                .children_of(name)
                .filter(|child| self.registry.subtree_selected(child.name(), selection))
                .cloned()
                .collect();

            let paginator = self.paginator_for(&descriptor);
            let mut pagination = PaginationState::new();
            debug!(stream = name, context = %context, "traversing");

            while pagination.has_more {
                let page = (!pagination.is_first_page()).then_some(pagination.current_page);
                let request = self.requests.build(&descriptor, &context, page)?;

                let response = self.transport.get(&request).await?;
                self.stats.add_request();
                if !response.is_success() {
                    return Err(Error::http_status(
                        response.status,
                        request.full_url().as_str(),
                        truncate_body(&response.body),
                    ));
                }

                paginator.process_response(&response.headers, &mut pagination)?;
                let records = decode::parse(&response.body, descriptor.record_shape(), name)?;
                self.stats.add_page();
                debug!(
                    stream = name,
                    page = page.unwrap_or(1),
                    records = records.len(),
                    "page fetched"
                );

                for record in records {
                    let Some(record) = descriptor.post_process(record, &context) else {
                        self.stats.add_skipped();
                        continue;
                    };

                    let child_context =
                        (!children.is_empty()).then(|| descriptor.project_child_context(&record));

                    if emit {
                        if let Some(key) = descriptor.replication_key() {
                            if let Some(value) = extract_path(&record, key) {
                                self.state.advance_bookmark(name, key, value).await;
                            }
                        }
                        sink.write_record(name, record)?;
                        self.stats.add_record(name);
                    }

                    if let Some(child_context) = child_context {
                        for child in &children {
                            self.traverse(
                                Arc::clone(child),
                                child_context.clone(),
                                selection,
                                &mut *sink,
                            )
                            .await?;
                        }
                    }
                }
            }

            Ok(())
        })
    }
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
