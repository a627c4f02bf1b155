// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::engine::RuntimeOptions;

/// Countdown used for machines that do not specify their own.
pub const DEFAULT_UPDATE_DELAY: u32 = 2;
/// Concurrency limit used when none is configured.
pub const DEFAULT_CONCURRENCY: usize = 2;
/// Fleet size used when neither `machines` nor `[[machine]]` is given.
pub const DEFAULT_MACHINES: usize = 10;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [simulation]
/// machines = 10
/// update_delay = 2
/// concurrency = 2
///
/// [[machine]]
/// update_delay = 3
/// ```
///
/// All sections are optional and have reasonable defaults. This is the
/// unvalidated form; convert it into a [`ConfigFile`] with `try_from`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// Global settings from `[simulation]`.
    #[serde(default)]
    pub simulation: SimulationSection,

    /// Optional explicit fleet from `[[machine]]`, in fleet order.
    #[serde(default)]
    pub machine: Vec<MachineConfig>,
}

/// `[simulation]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    /// Fleet size. Must agree with the number of `[[machine]]` entries when
    /// both are given.
    #[serde(default)]
    pub machines: Option<usize>,

    /// Default countdown for every machine.
    #[serde(default = "default_update_delay")]
    pub update_delay: u32,

    /// Maximum number of machines updating at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Tick ceiling. When unset, the fleet's convergence bound is used.
    #[serde(default)]
    pub max_ticks: Option<u64>,

    /// Pause between ticks, in milliseconds.
    #[serde(default)]
    pub tick_interval_ms: u64,
}

fn default_update_delay() -> u32 {
    DEFAULT_UPDATE_DELAY
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            machines: None,
            update_delay: default_update_delay(),
            concurrency: default_concurrency(),
            max_ticks: None,
            tick_interval_ms: 0,
        }
    }
}

/// `[[machine]]` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    /// Per-machine countdown; falls back to `[simulation].update_delay`.
    #[serde(default)]
    pub update_delay: Option<u32>,
}

/// Values that replace file settings before validation (from the CLI).
#[derive(Debug, Clone, Default)]
pub struct SimulationOverrides {
    pub machines: Option<usize>,
    pub update_delay: Option<u32>,
    pub concurrency: Option<usize>,
    pub max_ticks: Option<u64>,
    pub tick_interval_ms: Option<u64>,
}

impl RawConfigFile {
    /// Apply overrides on top of whatever the file said.
    ///
    /// Overriding the fleet size drops any explicit `[[machine]]` list, since
    /// the two would no longer describe the same fleet.
    pub fn with_overrides(mut self, overrides: &SimulationOverrides) -> Self {
        if let Some(machines) = overrides.machines {
            if !self.machine.is_empty() && self.machine.len() != machines {
                self.machine.clear();
            }
            self.simulation.machines = Some(machines);
        }
        if let Some(delay) = overrides.update_delay {
            self.simulation.update_delay = delay;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.simulation.concurrency = concurrency;
        }
        if let Some(max_ticks) = overrides.max_ticks {
            self.simulation.max_ticks = Some(max_ticks);
        }
        if let Some(ms) = overrides.tick_interval_ms {
            self.simulation.tick_interval_ms = ms;
        }
        self
    }
}

/// Validated configuration.
///
/// Only obtainable through `ConfigFile::try_from(RawConfigFile)`, so holders
/// can rely on a non-empty fleet and a positive concurrency limit.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub simulation: SimulationSection,
    pub machine: Vec<MachineConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(simulation: SimulationSection, machine: Vec<MachineConfig>) -> Self {
        Self {
            simulation,
            machine,
        }
    }

    pub fn fleet_size(&self) -> usize {
        if self.machine.is_empty() {
            self.simulation.machines.unwrap_or(DEFAULT_MACHINES)
        } else {
            self.machine.len()
        }
    }

    /// Countdown for each machine, in fleet order.
    pub fn machine_delays(&self) -> Vec<u32> {
        let default_delay = self.simulation.update_delay;
        if self.machine.is_empty() {
            vec![default_delay; self.fleet_size()]
        } else {
            self.machine
                .iter()
                .map(|m| m.update_delay.unwrap_or(default_delay))
                .collect()
        }
    }

    pub fn concurrency(&self) -> usize {
        self.simulation.concurrency
    }

    pub fn runtime_options(&self) -> RuntimeOptions {
        RuntimeOptions {
            max_ticks: self.simulation.max_ticks,
            tick_interval: Duration::from_millis(self.simulation.tick_interval_ms),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(SimulationSection::default(), Vec::new())
    }
}
