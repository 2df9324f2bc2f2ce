use std::fs;
use std::io;
use std::path::Path;

use super::Report;
use crate::error::{Result, StatsError};

/// Pretty JSON with two-space indentation.
pub fn to_pretty_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Write the report, replacing whatever is at `path`. The parent directory
/// must already exist.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let write_failed = |source: io::Error| StatsError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let json = to_pretty_json(report).map_err(|e| write_failed(io::Error::other(e)))?;
    fs::write(path, json).map_err(write_failed)?;

    tracing::debug!(path = %path.display(), "Wrote report");
    Ok(())
}
