//! Structured logging infrastructure for booklog

use crate::error::{BooklogError, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Targets whose record and table dumps `dump_records` turns on.
const DUMP_DIRECTIVES: [&str; 2] = ["booklog_notion=debug", "booklog::pipeline=debug"];

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "booklog_notion=trace")
    pub level: String,
    /// Whether to emit JSON lines instead of human-readable output
    pub json_format: bool,
    /// Whether to include target module information
    pub include_targets: bool,
    /// Whether to dump every raw record and parsed row while building the table
    pub dump_records: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_targets: true,
            dump_records: false,
        }
    }
}

impl LoggingConfig {
    /// Diagnostics level to pass through the pipeline
    pub const fn diagnostics(&self) -> Diagnostics {
        if self.dump_records {
            Diagnostics::Verbose
        } else {
            Diagnostics::Standard
        }
    }
}

/// How much per-record detail pipeline stages emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Diagnostics {
    /// Stage summaries and dropped-record warnings only
    #[default]
    Standard,
    /// Also dump raw record properties and every parsed row at debug level
    Verbose,
}

impl Diagnostics {
    /// Whether per-record dumps are enabled
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

/// Build the env filter, falling back to `info` when the directive is invalid
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Build the filter for a logging configuration.
///
/// With `dump_records` set, the dumping targets are raised to `debug`
/// whatever the configured level.
pub fn log_filter(config: &LoggingConfig) -> EnvFilter {
    let filter = env_filter(&config.level);
    if !config.dump_records {
        return filter;
    }
    DUMP_DIRECTIVES
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(filter, EnvFilter::add_directive)
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(log_filter(config));

    let result = if config.json_format {
        registry
            .with(fmt::layer().json().with_target(config.include_targets))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(config.include_targets))
            .try_init()
    };

    result.map_err(|e| BooklogError::config_with_source("Failed to initialize logging", e))
}
