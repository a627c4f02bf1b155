use std::sync::{Arc, Mutex};

use rollsim::engine::{RunReport, TickSummary};
use rollsim::report::ProgressReporter;

/// A reporter that records every summary it sees.
///
/// Clones share the same storage, so a test can hand one clone to the
/// runtime and inspect the other after the run.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    ticks: Arc<Mutex<Vec<TickSummary>>>,
    finished: Arc<Mutex<Option<RunReport>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks(&self) -> Vec<TickSummary> {
        self.ticks.lock().unwrap().clone()
    }

    pub fn finished(&self) -> Option<RunReport> {
        self.finished.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn on_tick(&mut self, summary: &TickSummary) {
        self.ticks.lock().unwrap().push(summary.clone());
    }

    fn on_finished(&mut self, report: &RunReport) {
        *self.finished.lock().unwrap() = Some(report.clone());
    }
}
