//! Logging setup for the command-line tool.
//!
//! Everything goes to stderr so `summary` and `config` output on stdout stays
//! pipeable. Set `DEBUG_LOGGING=1` for debug output from the mission-stats
//! crates, or `RUST_LOG` for full control.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_DIRECTIVE: &str = "info";
const DEBUG_DIRECTIVE: &str = "info,mission_stats_core=debug,mission_stats_cli=debug";

/// Filter directive for the given environment. `RUST_LOG` wins over
/// `DEBUG_LOGGING`.
pub fn filter_directive(rust_log: Option<&str>, debug_logging: bool) -> String {
    match rust_log {
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ if debug_logging => DEBUG_DIRECTIVE.to_string(),
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init() {
    let rust_log = std::env::var("RUST_LOG").ok();
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();
    let directive = filter_directive(rust_log.as_deref(), debug_logging);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!("Ignoring invalid log filter '{directive}': {err}");
        EnvFilter::new(DEFAULT_DIRECTIVE)
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::debug!(debug_logging, "Logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_defaults_to_info() {
        assert_eq!(filter_directive(None, false), "info");
        assert_eq!(filter_directive(Some("  "), false), "info");
    }

    #[test]
    fn test_filter_directive_debug_logging() {
        assert_eq!(filter_directive(None, true), DEBUG_DIRECTIVE);
    }

    #[test]
    fn test_filter_directive_rust_log_wins() {
        assert_eq!(filter_directive(Some("warn"), true), "warn");
    }
}
