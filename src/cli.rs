// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::SimulationOverrides;

/// Command-line arguments for `rollsim`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "rollsim",
    version,
    about = "Simulate a rolling deployment of a fleet under a concurrency limit.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a config file (TOML).
    ///
    /// Default: `Rollsim.toml` in the current working directory, if it
    /// exists; otherwise built-in defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of machines in the fleet.
    #[arg(long, value_name = "N")]
    pub machines: Option<usize>,

    /// Units of update work each machine needs.
    #[arg(long, value_name = "TICKS")]
    pub update_delay: Option<u32>,

    /// Maximum number of machines updating at once.
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Give up after this many ticks.
    #[arg(long, value_name = "TICKS")]
    pub max_ticks: Option<u64>,

    /// Pause between ticks, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub tick_interval_ms: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ROLLSIM_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the configuration, but don't run the simulation.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    pub fn overrides(&self) -> SimulationOverrides {
        SimulationOverrides {
            machines: self.machines,
            update_delay: self.update_delay,
            concurrency: self.concurrency,
            max_ticks: self.max_ticks,
            tick_interval_ms: self.tick_interval_ms,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_overrides() {
        let args = CliArgs::parse_from([
            "rollsim",
            "--machines",
            "4",
            "--concurrency",
            "3",
            "--max-ticks",
            "40",
        ]);
        let o = args.overrides();
        assert_eq!(o.machines, Some(4));
        assert_eq!(o.concurrency, Some(3));
        assert_eq!(o.max_ticks, Some(40));
        assert_eq!(o.update_delay, None);
        assert!(!args.dry_run);
    }

    #[test]
    fn no_flags_means_no_overrides() {
        let args = CliArgs::parse_from(["rollsim"]);
        assert!(args.config.is_none());
        assert!(args.overrides().machines.is_none());
    }
}
