//! Output file writing and the optional browser hand-off.

use booklog_common::Result;
use booklog_config::OutputConfig;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{info, instrument, warn};

/// Writes the chart and the Markdown table to their configured locations.
#[derive(Debug, Clone, Copy)]
pub struct ReportWriter<'a> {
    output: &'a OutputConfig,
}

impl<'a> ReportWriter<'a> {
    /// Create a writer for the configured output paths.
    pub const fn new(output: &'a OutputConfig) -> Self {
        Self { output }
    }

    /// Write the rendered chart.
    pub fn write_chart(&self, chart: &[u8]) -> Result<&'a Path> {
        write_output(&self.output.graphic, chart)?;
        Ok(&self.output.graphic)
    }

    /// Write the Markdown report.
    pub fn write_table(&self, markdown: &str) -> Result<&'a Path> {
        write_output(&self.output.table, markdown.as_bytes())?;
        Ok(&self.output.table)
    }

    /// Write the SVG preview, if a location is configured.
    pub fn write_preview(&self, svg: &[u8]) -> Result<Option<&'a Path>> {
        let Some(path) = self.output.preview_svg.as_deref() else {
            return Ok(None);
        };
        write_output(path, svg)?;
        Ok(Some(path))
    }

    /// Whether a preview location is configured.
    pub const fn wants_preview(&self) -> bool {
        self.output.preview_svg.is_some()
    }
}

/// Replace `path` with `contents`, creating missing parent directories.
#[instrument(skip_all, fields(path = %path.display(), bytes = contents.len()))]
pub fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    info!("overwrote {}", path.display());
    Ok(())
}

/// Hand the file to the platform opener. Returns whether a launcher started.
pub fn open_in_browser(path: &Path) -> bool {
    let target = path.display().to_string();

    #[cfg(target_os = "macos")]
    let launchers = vec![("open", vec![target.as_str()])];
    #[cfg(target_os = "windows")]
    let launchers = vec![("cmd", vec!["/C", "start", "", target.as_str()])];
    #[cfg(all(not(target_os = "macos"), not(target_os = "windows")))]
    let launchers = vec![("xdg-open", vec![target.as_str()])];

    for (program, args) in launchers {
        if Command::new(program).args(&args).spawn().is_ok() {
            info!(program, path = %target, "Opened chart");
            return true;
        }
    }

    warn!(path = %target, "Could not open chart automatically");
    false
}
