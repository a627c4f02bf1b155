// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::fleet::FleetCounts;
use crate::types::{MachineId, MachineState, Transition};

#[derive(Error, Debug)]
pub enum RollsimError {
    /// A machine was asked to perform a transition from the wrong state.
    ///
    /// This always indicates a scheduling bug; the run is aborted.
    #[error("invalid transition on {machine}: `{operation}` is not allowed in state `{state}`")]
    InvalidTransition {
        machine: MachineId,
        operation: Transition,
        state: MachineState,
    },

    #[error("Machine not found: {0}")]
    MachineNotFound(MachineId),

    #[error("simulation did not converge within {limit} ticks (still {counts})")]
    TickLimitExceeded { limit: u64, counts: FleetCounts },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RollsimError>;
