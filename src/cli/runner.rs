//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{TapConfig, AUTH_TOKEN_ENV};
use crate::context::StreamContext;
use crate::engine::{SyncEngine, SyncReport};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, HttpTransport};
use crate::output::{RecordSink, SingerWriter};
use crate::request::RequestBuilder;
use crate::state::StateManager;
use crate::stream::{StreamDescriptor, StreamRegistry};
use crate::streams::default_registry;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Tap name reported by `about` and the connection check
pub const TAP_NAME: &str = "tap-getresponse";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::About => self.about(),
            Commands::Discover => self.discover(),
            Commands::Check => self.check().await,
            Commands::Read { streams } => self.read(streams).await,
        }
    }

    /// Load config: inline JSON, then the config file, then the environment
    pub fn load_config(&self) -> Result<TapConfig> {
        if let Some(json) = &self.cli.config_json {
            return TapConfig::from_json(json).context("invalid --config-json");
        }
        if let Some(path) = &self.cli.config {
            return TapConfig::from_file(path)
                .with_context(|| format!("config file '{}'", path.display()));
        }
        TapConfig::from_env()
    }

    /// Load state
    pub fn load_state(&self) -> Result<StateManager> {
        // Inline state takes precedence
        if let Some(state_json) = &self.cli.state_json {
            StateManager::from_json(state_json).context("invalid --state-json")
        } else if let Some(path) = &self.cli.state {
            StateManager::from_file(path)
                .with_context(|| format!("state file '{}'", path.display()))
        } else {
            Ok(StateManager::in_memory())
        }
    }

    fn about(&self) -> Result<()> {
        let registry = default_registry()?;
        self.output_message(&about_message(&registry));
        Ok(())
    }

    fn discover(&self) -> Result<()> {
        let registry = default_registry()?;
        self.output_message(&catalog(&registry));
        Ok(())
    }

    /// Check connection
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = HttpClient::with_config(config.http_config())?;
        let registry = default_registry()?;

        let message = match check_connection(&client, &registry, &config).await {
            Ok(stream) => json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": {
                    "status": "SUCCEEDED",
                    "message": format!("Fetched the first page of '{stream}'")
                }
            }),
            Err(e) => json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": {
                    "status": "FAILED",
                    "message": format!("Connection failed: {e}")
                }
            }),
        };
        self.output_message(&message);
        Ok(())
    }

    async fn read(&self, streams: &[String]) -> Result<()> {
        let config = self.load_config()?;
        let client = HttpClient::with_config(config.http_config())?;
        let mut writer = SingerWriter::stdout().with_pretty(self.cli.format == OutputFormat::Pretty);

        let report = self
            .read_into(Arc::new(client), &config, streams, &mut writer)
            .await?;

        if report.is_success() {
            Ok(())
        } else {
            let failed: Vec<&str> = report.failed.iter().map(|(s, _)| s.as_str()).collect();
            Err(Error::Other(format!(
                "{} stream(s) failed: {}",
                failed.len(),
                failed.join(", ")
            )))
        }
    }

    /// Sync the selected streams into `sink`
    ///
    /// `streams` falls back to the config's `streams`, and an empty list
    /// selects everything.
    pub async fn read_into(
        &self,
        transport: Arc<dyn HttpTransport>,
        config: &TapConfig,
        streams: &[String],
        sink: &mut dyn RecordSink,
    ) -> Result<SyncReport> {
        let registry = default_registry()?;
        let requested: &[String] = if streams.is_empty() {
            &config.streams
        } else {
            streams
        };
        let selection = registry.select(requested)?;
        info!(streams = ?selection, "Selected streams");

        let mut engine = SyncEngine::new(transport, Arc::new(registry), config.sync_config())?
            .with_state(self.load_state()?);
        let report = engine.sync(&selection, sink).await;

        let stats = engine.stats();
        info!(
            records = stats.records_synced(),
            skipped = stats.records_skipped,
            requests = stats.requests,
            pages = stats.pages_fetched,
            failed = report.failed.len(),
            duration_ms = stats.duration_ms,
            "Sync finished"
        );
        Ok(report)
    }

    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Request the first page of the first root stream
///
/// Returns the name of the stream that answered.
pub async fn check_connection(
    transport: &dyn HttpTransport,
    registry: &StreamRegistry,
    config: &TapConfig,
) -> Result<String> {
    let root = registry
        .roots()
        .next()
        .ok_or_else(|| Error::config("no root stream registered"))?;
    let request = RequestBuilder::new(&config.base_url, config.per_page)?.build(
        root,
        &StreamContext::new(),
        None,
    )?;

    let response = transport.get(&request).await?;
    if !response.is_success() {
        return Err(Error::http_status(
            response.status,
            request.full_url().as_str(),
            response.body,
        ));
    }
    Ok(root.name().to_string())
}

/// Tap metadata printed by `about`
pub fn about_message(registry: &StreamRegistry) -> Value {
    json!({
        "name": TAP_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Singer tap for the GetResponse API",
        "capabilities": ["catalog", "discover", "state"],
        "settings": [
            {
                "name": "auth_token",
                "required": true,
                "secret": true,
                "description": format!("API key, falls back to ${AUTH_TOKEN_ENV}")
            },
            {"name": "per_page", "required": false, "description": "Page size, 1 to 1000"},
            {"name": "user_agent", "required": false, "description": "User-Agent header"},
            {"name": "base_url", "required": false, "description": "API root"},
            {"name": "timeout_secs", "required": false, "description": "Request timeout"},
            {
                "name": "strict_pagination",
                "required": false,
                "description": "Fail when a later page has no pagination headers"
            },
            {"name": "streams", "required": false, "description": "Default stream selection"}
        ],
        "streams": registry.names(),
    })
}

/// Singer catalog of every registered stream
pub fn catalog(registry: &StreamRegistry) -> Value {
    let streams: Vec<Value> = registry.iter().map(|s| catalog_entry(s)).collect();
    json!({ "streams": streams })
}

fn catalog_entry(stream: &StreamDescriptor) -> Value {
    let replication_method = if stream.replication_key().is_some() {
        "INCREMENTAL"
    } else {
        "FULL_TABLE"
    };

    json!({
        "tap_stream_id": stream.name(),
        "stream": stream.name(),
        "schema": stream.schema().to_json(),
        "key_properties": stream.primary_keys(),
        "replication_key": stream.replication_key(),
        "replication_method": replication_method,
        "parent_stream": stream.parent_name(),
        "metadata": [{
            "breadcrumb": [],
            "metadata": {
                "inclusion": "available",
                "selected": true,
                "table-key-properties": stream.primary_keys(),
                "forced-replication-method": replication_method,
            }
        }]
    })
}
