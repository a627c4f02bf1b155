#![allow(dead_code)]

use rollsim::config::{ConfigFile, MachineConfig, RawConfigFile, SimulationSection};
use rollsim::engine::Simulation;
use rollsim::fleet::Environment;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                simulation: SimulationSection::default(),
                machine: Vec::new(),
            },
        }
    }

    pub fn machines(mut self, count: usize) -> Self {
        self.config.simulation.machines = Some(count);
        self
    }

    pub fn update_delay(mut self, delay: u32) -> Self {
        self.config.simulation.update_delay = delay;
        self
    }

    pub fn concurrency(mut self, limit: usize) -> Self {
        self.config.simulation.concurrency = limit;
        self
    }

    pub fn max_ticks(mut self, max: u64) -> Self {
        self.config.simulation.max_ticks = Some(max);
        self
    }

    pub fn tick_interval_ms(mut self, ms: u64) -> Self {
        self.config.simulation.tick_interval_ms = ms;
        self
    }

    /// Append an explicit `[[machine]]` entry.
    pub fn with_machine(mut self, update_delay: Option<u32>) -> Self {
        self.config.machine.push(MachineConfig { update_delay });
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a simulation over `machines` identical machines.
pub fn uniform_simulation(machines: usize, update_delay: u32, concurrency: usize) -> Simulation {
    Simulation::new(Environment::uniform(machines, update_delay), concurrency)
}
