// src/config/validate.rs

use tracing::warn;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, RollsimError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RollsimError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.simulation, raw.machine))
    }
}

/// Run semantic validation against a loaded configuration.
///
/// This checks:
/// - the concurrency limit is at least 1 (a zero limit never converges)
/// - the fleet has at least one machine
/// - `[simulation].machines` agrees with the `[[machine]]` list
/// - `max_ticks`, when given, is at least 1
fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_concurrency(cfg)?;
    validate_fleet(cfg)?;
    validate_limits(cfg)?;
    Ok(())
}

fn validate_concurrency(cfg: &RawConfigFile) -> Result<()> {
    if cfg.simulation.concurrency == 0 {
        return Err(RollsimError::ConfigError(
            "[simulation].concurrency must be >= 1 (got 0); no machine could ever be admitted"
                .to_string(),
        ));
    }
    Ok(())
}

fn validate_fleet(cfg: &RawConfigFile) -> Result<()> {
    match (cfg.simulation.machines, cfg.machine.len()) {
        (Some(0), 0) => Err(RollsimError::ConfigError(
            "[simulation].machines must be >= 1 (got 0)".to_string(),
        )),
        (Some(count), listed) if listed > 0 && count != listed => {
            Err(RollsimError::ConfigError(format!(
                "[simulation].machines = {count} but {listed} [[machine]] entries are defined"
            )))
        }
        _ => {
            if cfg.simulation.update_delay == 0 {
                warn!("[simulation].update_delay is 0; machines finish after one unit of work");
            }
            Ok(())
        }
    }
}

fn validate_limits(cfg: &RawConfigFile) -> Result<()> {
    if cfg.simulation.max_ticks == Some(0) {
        return Err(RollsimError::ConfigError(
            "[simulation].max_ticks must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
