//! Error types for the stats pipeline
//!
//! Every failure is fatal. The variants only exist so the CLI can say which
//! stage gave up and why.

use std::path::PathBuf;
use thiserror::Error;

use crate::context::ConfigError;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("input file {path} could not be read")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input is malformed: {detail}")]
    InputMalformed { detail: String },

    #[error("required field `{field}` missing on {context}")]
    RequiredFieldMissing { field: String, context: String },

    #[error("failed to write report to {path}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl StatsError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        StatsError::InputMalformed {
            detail: detail.into(),
        }
    }

    pub(crate) fn missing(field: impl Into<String>, context: impl Into<String>) -> Self {
        StatsError::RequiredFieldMissing {
            field: field.into(),
            context: context.into(),
        }
    }
}
