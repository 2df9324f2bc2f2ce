use std::fs;
use std::path::Path;
use std::time::Instant;

use super::SessionLog;
use crate::error::{Result, StatsError};

/// Read and parse a recorded session in one go.
pub fn load_session_log(path: &Path) -> Result<SessionLog> {
    let timer = Instant::now();
    let bytes = fs::read(path).map_err(|source| StatsError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let log = SessionLog::from_slice(&bytes)?;

    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        entities = log.entities.as_ref().map_or(0, Vec::len),
        events = log.events.as_ref().map_or(0, Vec::len),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Loaded session log"
    );
    Ok(log)
}
