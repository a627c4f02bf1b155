// src/logging.rs

//! Logging setup for `rollsim` using `tracing` + `tracing-subscriber`.
//!
//! Filter priority:
//! 1. `--log-level` CLI flag (applies to every target)
//! 2. `ROLLSIM_LOG` environment variable, as a full `EnvFilter` directive
//!    string (e.g. `"debug"` or `"rollsim::engine=trace,info"`)
//! 3. default to `info`
//!
//! Logs are sent to STDERR so that stdout only carries the dry-run output
//! and the final summary line.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV_VAR: &str = "ROLLSIM_LOG";

/// Initialise the global logging subscriber.
///
/// Fails if a subscriber has already been installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let directive = filter_directive(cli_level, std::env::var(LOG_ENV_VAR).ok().as_deref());

    fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

/// Pick the filter directive: CLI level, then the env directive, then `info`.
///
/// An env directive that does not parse falls back to `info`.
fn filter_directive(cli_level: Option<LogLevel>, env_directive: Option<&str>) -> String {
    if let Some(lvl) = cli_level {
        return level_directive(lvl).to_string();
    }

    env_directive
        .map(str::trim)
        .filter(|s| !s.is_empty() && EnvFilter::try_new(s).is_ok())
        .unwrap_or("info")
        .to_string()
}

fn level_directive(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_wins_over_env() {
        assert_eq!(filter_directive(Some(LogLevel::Trace), Some("error")), "trace");
    }

    #[test]
    fn env_directive_is_used_when_no_cli_level() {
        assert_eq!(
            filter_directive(None, Some(" rollsim::engine=debug ")),
            "rollsim::engine=debug"
        );
    }

    #[test]
    fn blank_invalid_or_missing_env_falls_back_to_info() {
        assert_eq!(filter_directive(None, Some("  ")), "info");
        assert_eq!(filter_directive(None, Some("rollsim=notalevel")), "info");
        assert_eq!(filter_directive(None, None), "info");
    }
}
