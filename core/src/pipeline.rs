//! Load → index/extract/aggregate → build → write, in one call.

use std::time::Instant;

use crate::context::PipelineConfig;
use crate::error::Result;
use crate::report::{Report, build_report, write_report};
use crate::session_log::load_session_log;

/// Load the configured session and build its report without writing it.
pub fn build(config: &PipelineConfig) -> Result<Report> {
    let log = load_session_log(&config.input_path)?;
    build_report(&log, &config.report_options())
}

/// Full run: build the report and write it to the configured output path.
pub fn run(config: &PipelineConfig) -> Result<Report> {
    let timer = Instant::now();
    let span = tracing::info_span!("pipeline", input = %config.input_path.display());
    let _enter = span.enter();

    let report = build(config)?;
    write_report(&report, &config.output_path)?;

    tracing::info!(
        output = %config.output_path.display(),
        player = report.stats.player.len(),
        ai = report.stats.ai.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Report written"
    );
    Ok(report)
}
