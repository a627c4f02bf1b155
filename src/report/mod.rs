// src/report/mod.rs

//! Progress reporting, layered on top of the structured tick summaries.
//!
//! The runtime talks to a `ProgressReporter` instead of logging directly.
//! This keeps the simulation core free of output concerns and lets tests
//! record summaries instead of scraping log text.
//!
//! - [`LogReporter`] is the default implementation used by `rollsim`. It
//!   narrates every tick through `tracing`.
//! - [`NullReporter`] discards everything.

use tracing::info;

use crate::engine::{RunOutcome, RunReport, TickSummary};

/// Observer for simulation progress.
pub trait ProgressReporter: Send {
    /// Called once after every tick.
    fn on_tick(&mut self, summary: &TickSummary);

    /// Called once when the run stops, whether it converged or not.
    fn on_finished(&mut self, report: &RunReport);
}

/// Reporter that renders summaries as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn on_tick(&mut self, s: &TickSummary) {
        info!(tick = s.tick, "{} servers moved to production", s.promoted);
        info!(
            tick = s.tick,
            "found {} servers that still need to finish updating", s.progressed
        );
        info!(tick = s.tick, "concurrency delta is {}", s.concurrency_delta);
        info!(
            tick = s.tick,
            "selected {} old servers for the update process", s.admitted
        );
        info!(
            tick = s.tick,
            total = s.total_machines,
            new = s.new_machines,
            "total machines {}, new machines {}",
            s.total_machines,
            s.new_machines
        );
        if s.complete {
            info!(tick = s.tick, "all servers are up to date");
        } else {
            info!(tick = s.tick, "rolling deployment still in progress");
        }
    }

    fn on_finished(&mut self, report: &RunReport) {
        match report.outcome {
            RunOutcome::Completed => info!(
                ticks = report.ticks,
                peak_updating = report.peak_updating,
                "simulation finished"
            ),
            RunOutcome::Interrupted => info!(
                ticks = report.ticks,
                counts = %report.final_counts,
                "simulation interrupted"
            ),
        }
    }
}

/// Reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn on_tick(&mut self, _summary: &TickSummary) {}

    fn on_finished(&mut self, _report: &RunReport) {}
}
