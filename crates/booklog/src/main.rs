//! Main entry point for booklog.

use anyhow::Context;
use booklog::Pipeline;
use booklog_common::init_logging;
use booklog_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting booklog");

    let pipeline = Pipeline::new(&config, config.logging.diagnostics());
    match pipeline.run().await {
        Ok(summary) => {
            info!(
                chart = %summary.chart_path.display(),
                table = %summary.table_path.display(),
                "Done"
            );
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(e).context("Reading log update failed")
        }
    }
}
