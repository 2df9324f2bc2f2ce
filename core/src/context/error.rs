//! Error types for configuration handling

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration from {path}")]
    LoadPath {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("config file {path} does not exist")]
    NotFound { path: PathBuf },

    #[error("invalid time format '{format}'")]
    TimeFormat { format: String },
}
