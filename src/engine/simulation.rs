// src/engine/simulation.rs

//! The tick algorithm.
//!
//! This is a synchronous, deterministic core with no IO: each call to
//! [`Simulation::do_tick`] runs the three phases in a fixed order and returns
//! a [`TickSummary`]. The async shell in [`crate::engine::runtime`] only
//! decides *when* to tick.

use tracing::{debug, info};

use crate::engine::summary::{RunOutcome, RunReport, TickSummary};
use crate::errors::{Result, RollsimError};
use crate::fleet::{Environment, Machine};
use crate::types::MachineId;

/// Drives one environment to completion under a flat concurrency limit.
#[derive(Debug)]
pub struct Simulation {
    environment: Environment,
    concurrency_limit: usize,
    ticks: u64,
}

impl Simulation {
    pub fn new(environment: Environment, concurrency_limit: usize) -> Self {
        Self {
            environment,
            concurrency_limit,
            ticks: 0,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_environment(self) -> Environment {
        self.environment
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Ticks executed so far.
    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks
    }

    /// Upper bound on ticks needed to converge from a fresh fleet, or `None`
    /// when the limit is zero and no machine can ever be admitted.
    pub fn convergence_bound(&self) -> Option<u64> {
        convergence_bound(
            self.environment
                .all_machines()
                .iter()
                .map(Machine::remaining_update_ticks),
            self.concurrency_limit,
        )
    }

    /// Run one tick: promote, progress, admit, then check for completion.
    ///
    /// The phase order matters. Promotion runs first so a machine that
    /// finished last tick goes to production before anything else, and
    /// admission uses the number of machines that were updating *before*
    /// progress, so machines finishing this tick still hold their slot until
    /// they are promoted next tick.
    ///
    /// Any invalid transition aborts the tick immediately.
    pub fn do_tick(&mut self) -> Result<TickSummary> {
        self.ticks += 1;
        let tick = self.ticks;

        // Promotion.
        let to_promote = collect_ids(self.environment.updated_machines());
        for id in &to_promote {
            self.environment.machine_mut(*id)?.move_to_production()?;
        }
        debug!(tick, promoted = to_promote.len(), "promotion phase done");

        // Progress.
        let updating = collect_ids(self.environment.updating_machines());
        let mut finished = 0;
        for id in &updating {
            let machine = self.environment.machine_mut(*id)?;
            machine.do_update_work()?;
            if machine.is_updated() {
                finished += 1;
            }
        }
        debug!(
            tick,
            progressed = updating.len(),
            finished,
            "progress phase done"
        );

        // Admission. A non-positive delta selects nothing.
        let concurrency_delta = self.concurrency_limit as i64 - updating.len() as i64;
        let to_admit = self.environment.pick_old_servers(concurrency_delta);
        for id in &to_admit {
            self.environment.machine_mut(*id)?.start_updating()?;
        }
        debug!(
            tick,
            concurrency_delta,
            admitted = to_admit.len(),
            "admission phase done"
        );

        let counts = self.environment.counts();
        Ok(TickSummary {
            tick,
            promoted: to_promote.len(),
            progressed: updating.len(),
            finished,
            concurrency_delta,
            admitted: to_admit.len(),
            total_machines: counts.total(),
            new_machines: counts.new,
            counts,
            complete: counts.all_new(),
        })
    }

    /// Tick until every machine is `New`.
    ///
    /// There is no ceiling: with a zero concurrency limit this never returns.
    /// Use [`Simulation::run_with_limit`] when convergence is not guaranteed.
    pub fn run(&mut self) -> Result<RunReport> {
        let mut report = RunReport::new(self.environment.counts());
        loop {
            let summary = self.do_tick()?;
            let complete = summary.complete;
            report.record(summary);
            if complete {
                break;
            }
        }
        info!(ticks = report.ticks, "simulation converged");
        Ok(report)
    }

    /// Like [`Simulation::run`], but fails with
    /// [`RollsimError::TickLimitExceeded`] after `max_ticks` ticks without
    /// converging.
    pub fn run_with_limit(&mut self, max_ticks: u64) -> Result<RunReport> {
        let mut report = RunReport::new(self.environment.counts());
        while report.outcome != RunOutcome::Completed {
            if report.ticks >= max_ticks {
                return Err(RollsimError::TickLimitExceeded {
                    limit: max_ticks,
                    counts: self.environment.counts(),
                });
            }
            report.record(self.do_tick()?);
        }
        info!(ticks = report.ticks, "simulation converged");
        Ok(report)
    }
}

fn collect_ids<'a>(machines: impl Iterator<Item = &'a Machine>) -> Vec<MachineId> {
    machines.map(Machine::id).collect()
}

/// Safe upper bound on the number of ticks a fleet needs to converge.
///
/// A machine holds one concurrency slot from the tick it is admitted until
/// the tick it finishes, which is `max(delay, 1) + 1` ticks. Admission is
/// greedy, so every slot stays busy while old machines remain, and the last
/// machine is admitted no later than `ceil(total slot ticks / limit)`. It then
/// needs at most the longest hold plus one promotion tick.
///
/// Returns `None` for a zero limit.
pub fn convergence_bound<I>(delays: I, concurrency_limit: usize) -> Option<u64>
where
    I: IntoIterator<Item = u32>,
{
    if concurrency_limit == 0 {
        return None;
    }

    let (slot_ticks, longest) = delays
        .into_iter()
        .map(|d| u64::from(d.max(1)) + 1)
        .fold((0u64, 0u64), |(sum, max), hold| (sum + hold, max.max(hold)));

    Some(slot_ticks.div_ceil(concurrency_limit as u64) + longest + 1)
}
