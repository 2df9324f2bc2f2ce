use std::error::Error;
use std::io::Write;

use mission_stats_core::{PipelineConfig, ReportSummary, pipeline};

/// `error: cause: root cause`, for the one line printed before exiting.
pub fn describe(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

pub fn generate_report(config: &PipelineConfig, out: &mut impl Write) -> Result<(), String> {
    let report = pipeline::run(config).map_err(|e| describe(&e))?;
    writeln!(
        out,
        "wrote {} player and {} ai records to {}",
        report.stats.player.len(),
        report.stats.ai.len(),
        config.output_path.display()
    )
    .map_err(|e| e.to_string())
}

pub fn show_summary(config: &PipelineConfig, out: &mut impl Write) -> Result<(), String> {
    let report = pipeline::build(config).map_err(|e| describe(&e))?;
    let mission = &report.mission;

    writeln!(
        out,
        "{} ({}) by {} @ {}",
        mission.name.as_deref().unwrap_or("Unknown mission"),
        mission.world_name.as_deref().unwrap_or("unknown world"),
        mission.author.as_deref().unwrap_or("unknown author"),
        mission.time
    )
    .map_err(|e| e.to_string())?;
    write!(out, "{}", ReportSummary::from_stats(&report.stats)).map_err(|e| e.to_string())
}

pub fn show_config(config: &PipelineConfig, out: &mut impl Write) -> Result<(), String> {
    let text = config.to_toml().map_err(|e| describe(&e))?;
    write!(out, "{text}").map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mission_stats_core::StatsError;
    use serde_json::json;
    use std::path::Path;

    fn config_for(dir: &Path) -> PipelineConfig {
        let input = dir.join("session.json");
        let session = json!({
            "missionName": "Night Raid",
            "missionAuthor": "Ops",
            "worldName": "Tanoa",
            "times": [{"systemTimeUTC": "2024-06-30T22:15:00"}],
            "entities": [
                {"id": 3, "name": "Lead", "isPlayer": 1, "framesFired": [1, 2, 3, 4]},
                {"id": 4, "name": "Guard", "isPlayer": 0, "framesFired": [1]}
            ],
            "events": [
                [1, "hit", 4, [3], 50],
                [2, "killed", 4, [3], 50],
                [3, "hit", 3, [4], 20]
            ]
        });
        std::fs::write(&input, session.to_string()).unwrap();

        PipelineConfig {
            input_path: input,
            output_path: dir.join("report.json"),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_describe_includes_causes() {
        let err = StatsError::OutputWriteFailed {
            path: "out/report.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        assert_eq!(
            describe(&err),
            "failed to write report to out/report.json: no such directory"
        );
    }

    #[test]
    fn test_generate_report() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let mut out = Vec::new();

        generate_report(&config, &mut out).unwrap();

        let message = String::from_utf8(out).unwrap();
        assert!(message.starts_with("wrote 1 player and 1 ai records"));
        assert!(config.output_path.is_file());
    }

    #[test]
    fn test_generate_report_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            input_path: dir.path().join("absent.json"),
            ..config_for(dir.path())
        };

        let err = generate_report(&config, &mut Vec::new()).unwrap_err();
        assert!(err.starts_with("input file"), "{err}");
    }

    #[test]
    fn test_show_summary() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let mut out = Vec::new();

        show_summary(&config, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Night Raid (Tanoa) by Ops @ 06/30/2024, 22:15:00")
        );
        assert!(text.contains("player"));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_show_config() {
        let mut out = Vec::new();
        show_config(&PipelineConfig::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("input_path = \"./data/sample_data.json\""));
        assert!(text.contains("include_idle_entities = false"));
    }
}
