use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mission_stats_core::{PipelineConfig, Result};

#[derive(Debug, Parser)]
#[command(version, about = "Per-entity combat statistics from a recorded mission")]
pub struct Cli {
    /// TOML config file (default: the per-user mission-stats config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Recorded session JSON
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Where to write the report JSON
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Also list entities that never hit or killed anything
    #[arg(long, global = true)]
    pub include_idle: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Build the report and write it (default)
    Report,
    /// Build the report and print per-cohort totals instead of writing it
    Summary,
    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    /// Config file (explicit or per-user) with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<PipelineConfig> {
        let base = match &self.config {
            Some(path) => PipelineConfig::load_path(path)?,
            None => PipelineConfig::load(),
        };
        Ok(self.apply_overrides(base))
    }

    pub fn apply_overrides(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if self.include_idle {
            config.include_idle_entities = true;
        }
        config
    }

    pub fn selected_command(&self) -> Commands {
        self.command.unwrap_or(Commands::Report)
    }
}
