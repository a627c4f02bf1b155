// src/engine/mod.rs

//! Simulation engine for rollsim.
//!
//! This module ties together:
//! - the tick algorithm that promotes, progresses and admits machines
//! - the structured summaries each tick and run produce
//! - the async runtime loop that paces ticks and reacts to shutdown signals
//!
//! The pure core lives in [`simulation`]; the async/IO shell is
//! implemented in [`runtime`].

use std::time::Duration;

/// Runtime options for the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// Stop with `TickLimitExceeded` after this many ticks. When `None`, the
    /// simulation's convergence bound is used instead.
    pub max_ticks: Option<u64>,
    /// Delay between consecutive ticks. Zero means "as fast as possible".
    pub tick_interval: Duration,
}

/// Events flowing into the runtime from outside the tick loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod runtime;
pub mod simulation;
pub mod summary;

pub use runtime::Runtime;
pub use simulation::{convergence_bound, Simulation};
pub use summary::{RunOutcome, RunReport, TickSummary};
