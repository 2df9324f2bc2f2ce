mod config;
mod error;

pub use config::{APP_NAME, PipelineConfig};
pub use error::ConfigError;
