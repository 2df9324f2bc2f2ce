//! Pipeline configuration
//!
//! Paths default to the layout the recorder exports use (`data/` in,
//! `output/` out). A per-user TOML file managed by confy can override them,
//! and the CLI overrides both.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::ConfigError;
use crate::report::{DEFAULT_TIME_FORMAT, ReportOptions};

pub const APP_NAME: &str = "mission-stats";
const CONFIG_NAME: &str = "config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// strftime pattern for the mission start time.
    pub time_format: String,
    /// Also report entities that never hit or killed anything.
    pub include_idle_entities: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("./data/sample_data.json"),
            output_path: PathBuf::from("./output/output.json"),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            include_idle_entities: false,
        }
    }
}

impl PipelineConfig {
    /// User config, or defaults when there is none or it can't be read.
    pub fn load() -> Self {
        match confy::load(APP_NAME, CONFIG_NAME) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load user config, using defaults");
                Self::default()
            }
        }
    }

    /// Config from an explicit file. Unlike [`load`](Self::load) this fails
    /// instead of falling back, and never creates the file.
    pub fn load_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        confy::load_path(path).map_err(|source| ConfigError::LoadPath {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            time_format: self.time_format.clone(),
            include_idle_entities: self.include_idle_entities,
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
