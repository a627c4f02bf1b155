// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, info, warn};

use crate::errors::{Result, RollsimError};
use crate::report::ProgressReporter;

use super::simulation::Simulation;
use super::summary::RunReport;
use super::{RuntimeEvent, RuntimeOptions};

/// Paces a [`Simulation`] tick by tick and hands every summary to a
/// [`ProgressReporter`].
///
/// This is a pure IO shell around `Simulation`, which contains all the
/// scheduling semantics. This struct handles the async parts: waiting
/// between ticks, listening for shutdown requests, and enforcing the tick
/// ceiling.
pub struct Runtime<R: ProgressReporter> {
    simulation: Simulation,
    options: RuntimeOptions,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    events_open: bool,
    reporter: R,
}

impl<R: ProgressReporter> fmt::Debug for Runtime<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("simulation", &self.simulation)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<R: ProgressReporter> Runtime<R> {
    pub fn new(
        simulation: Simulation,
        options: RuntimeOptions,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        reporter: R,
    ) -> Self {
        Self {
            simulation,
            options,
            event_rx,
            events_open: true,
            reporter,
        }
    }

    /// Main tick loop.
    ///
    /// - Stops with `RunOutcome::Completed` once every machine is new.
    /// - Stops with `RunOutcome::Interrupted` on `ShutdownRequested`.
    /// - Fails with `TickLimitExceeded` at the ceiling (explicit
    ///   `max_ticks`, otherwise the fleet's convergence bound). The reporter
    ///   only sees `on_finished` for runs that return a report.
    pub async fn run(mut self) -> Result<RunReport> {
        let max_ticks = self
            .options
            .max_ticks
            .or_else(|| self.simulation.convergence_bound());
        if max_ticks.is_none() {
            warn!("no tick ceiling and no convergence bound; running until shutdown");
        }

        info!(
            machines = self.simulation.environment().len(),
            concurrency = self.simulation.concurrency_limit(),
            ?max_ticks,
            "rollsim runtime started"
        );

        let mut report = RunReport::new(self.simulation.environment().counts());

        loop {
            if self.shutdown_pending() {
                info!(ticks = report.ticks, "shutdown requested; stopping runtime");
                break;
            }

            if let Some(limit) = max_ticks {
                if report.ticks >= limit {
                    warn!(limit, counts = %report.final_counts, "tick ceiling reached");
                    return Err(RollsimError::TickLimitExceeded {
                        limit,
                        counts: report.final_counts,
                    });
                }
            }

            let summary = self.simulation.do_tick()?;
            self.reporter.on_tick(&summary);
            let complete = summary.complete;
            report.record(summary);

            if complete {
                break;
            }

            if self.wait_for_next_tick().await {
                info!(ticks = report.ticks, "shutdown requested; stopping runtime");
                break;
            }
        }

        self.reporter.on_finished(&report);
        info!(outcome = ?report.outcome, ticks = report.ticks, "runtime exiting");
        Ok(report)
    }

    /// Non-blocking check for a queued shutdown request.
    fn shutdown_pending(&mut self) -> bool {
        if !self.events_open {
            return false;
        }
        match self.event_rx.try_recv() {
            Ok(RuntimeEvent::ShutdownRequested) => true,
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                debug!("runtime event channel closed; ticking without shutdown support");
                self.events_open = false;
                false
            }
        }
    }

    /// Sleep for the configured tick interval, waking early on shutdown.
    ///
    /// Returns `true` if a shutdown was requested while waiting.
    async fn wait_for_next_tick(&mut self) -> bool {
        let interval = self.options.tick_interval;
        if interval.is_zero() {
            tokio::task::yield_now().await;
            return false;
        }

        if !self.events_open {
            tokio::time::sleep(interval).await;
            return false;
        }

        tokio::select! {
            biased;
            event = self.event_rx.recv() => match event {
                Some(RuntimeEvent::ShutdownRequested) => true,
                None => {
                    self.events_open = false;
                    tokio::time::sleep(interval).await;
                    false
                }
            },
            _ = tokio::time::sleep(interval) => false,
        }
    }
}
