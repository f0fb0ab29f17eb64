//! Record dumps as seen through the configured subscriber.

use booklog_common::test_utils::NotionPageFixture;
use booklog_common::{log_filter, LoggingConfig};
use booklog_notion::build_table;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{fmt, layer::SubscriberExt};

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn build_with_logging(config: &LoggingConfig) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::registry().with(log_filter(config)).with(
        fmt::layer()
            .with_ansi(false)
            .with_writer(move || writer.clone()),
    );

    let pages = vec![vec![NotionPageFixture::finished_book(
        "Dune",
        "Frank Herbert",
        "2021-01-01",
        "2021-01-20",
        600,
    )
    .to_json()]];
    let build = tracing::subscriber::with_default(subscriber, || {
        build_table(&pages, config.diagnostics())
    });
    assert_eq!(build.table.len(), 1);

    logs.contents()
}

#[test]
fn test_dump_records_prints_at_default_level() {
    let config = LoggingConfig {
        dump_records: true,
        ..LoggingConfig::default()
    };
    assert_eq!(config.level, "info");

    let output = build_with_logging(&config);

    assert!(output.contains("Raw record"), "missing record dump:\n{output}");
    assert!(output.contains("Parsed row"), "missing row dump:\n{output}");
    assert!(output.contains("Built reading table"));
}

#[test]
fn test_default_logging_omits_dumps() {
    let output = build_with_logging(&LoggingConfig::default());

    assert!(!output.contains("Raw record"));
    assert!(!output.contains("Parsed row"));
    assert!(output.contains("Built reading table"));
}
