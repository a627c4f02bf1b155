// src/engine/summary.rs

//! Structured results of ticks and runs.
//!
//! The simulation never prints; it returns these values and leaves rendering
//! to a [`crate::report::ProgressReporter`].

use crate::fleet::FleetCounts;

/// What happened during a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// 1-based tick number.
    pub tick: u64,
    /// Machines moved `Updated -> New` in the promotion phase.
    pub promoted: usize,
    /// Machines that were `Updating` at the start of the progress phase and
    /// received one unit of work.
    pub progressed: usize,
    /// Of the progressed machines, how many finished and became `Updated`.
    pub finished: usize,
    /// `concurrency limit - progressed`. May be zero or negative.
    pub concurrency_delta: i64,
    /// Machines moved `Old -> Updating` in the admission phase.
    pub admitted: usize,
    /// Fleet size.
    pub total_machines: usize,
    /// Machines in state `New` after this tick.
    pub new_machines: usize,
    /// Per-state counts after this tick.
    pub counts: FleetCounts,
    /// Whether every machine is now `New`.
    pub complete: bool,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every machine reached `New`.
    Completed,
    /// The run was stopped by a shutdown request before converging.
    Interrupted,
}

/// Aggregate result of running a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Number of ticks executed by this run. Ticks a simulation ran before
    /// the run started are not counted; see `TickSummary::tick` for the
    /// simulation-wide tick number.
    pub ticks: u64,
    /// Largest number of machines observed `Updating` at the end of a tick.
    pub peak_updating: usize,
    /// Per-state counts when the run stopped.
    pub final_counts: FleetCounts,
    /// One entry per executed tick, in order.
    pub summaries: Vec<TickSummary>,
}

impl RunReport {
    pub(crate) fn new(initial: FleetCounts) -> Self {
        Self {
            outcome: RunOutcome::Interrupted,
            ticks: 0,
            peak_updating: initial.updating,
            final_counts: initial,
            summaries: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, summary: TickSummary) {
        self.ticks += 1;
        self.peak_updating = self.peak_updating.max(summary.counts.updating);
        self.final_counts = summary.counts;
        if summary.complete {
            self.outcome = RunOutcome::Completed;
        }
        self.summaries.push(summary);
    }

    pub fn is_complete(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }

    /// Total machines admitted over the whole run.
    pub fn total_admitted(&self) -> usize {
        self.summaries.iter().map(|s| s.admitted).sum()
    }
}
