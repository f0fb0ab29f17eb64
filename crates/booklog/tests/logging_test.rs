//! The pipeline's table dump under the configured log filter.

use async_trait::async_trait;
use booklog::Pipeline;
use booklog_common::test_utils::NotionPageFixture;
use booklog_common::{env_filter, log_filter, Diagnostics, LoggingConfig, Result};
use booklog_config::Config;
use booklog_notion::{PageSource, QueryPage};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct OneBook;

#[async_trait]
impl PageSource for OneBook {
    async fn query_page(&self, _database_id: &str, _cursor: Option<String>) -> Result<QueryPage> {
        Ok(QueryPage {
            results: vec![NotionPageFixture::finished_book(
                "Dune",
                "Frank Herbert",
                "2021-01-01",
                "2021-01-20",
                600,
            )
            .to_json()],
            has_more: false,
            next_cursor: None,
        })
    }
}

fn config_in(dir: &Path, logging: LoggingConfig) -> Config {
    let mut config = Config::default();
    config.notion.database_id = "db".to_string();
    config.output.graphic = dir.join("chart.html");
    config.output.table = dir.join("books.md");
    config.chart.annotations.clear();
    config.logging = logging;
    config
}

async fn run_logged(config: &Config, filter: EnvFilter) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_ansi(false)
            .with_writer(move || writer.clone()),
    );
    let _guard = tracing::subscriber::set_default(subscriber);

    Pipeline::new(config, config.logging.diagnostics())
        .run_with_source(&OneBook)
        .await
        .unwrap();

    let bytes = logs.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[tokio::test]
async fn test_dump_records_shows_table_at_info_level() {
    let dir = TempDir::new().unwrap();
    let config = config_in(
        dir.path(),
        LoggingConfig {
            dump_records: true,
            ..LoggingConfig::default()
        },
    );

    let output = run_logged(&config, log_filter(&config.logging)).await;

    assert!(output.contains("Reading table"), "missing table dump:\n{output}");
    assert!(output.contains("| Dune "));
    assert!(output.contains("Raw record"));
}

#[tokio::test]
async fn test_table_dump_skipped_when_debug_filtered() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), LoggingConfig::default());
    assert_eq!(config.logging.diagnostics(), Diagnostics::Standard);

    // Verbose pipeline, but a filter that drops debug output.
    let pipeline_config = Config {
        logging: LoggingConfig {
            dump_records: true,
            ..LoggingConfig::default()
        },
        ..config
    };
    let output = run_logged(&pipeline_config, env_filter("info")).await;

    assert!(!output.contains("Reading table"));
    assert!(output.contains("Reading log updated"));
}
