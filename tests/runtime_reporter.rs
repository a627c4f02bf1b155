// tests/runtime_reporter.rs

mod common;
use crate::common::builders::uniform_simulation;
use crate::common::{init_tracing, with_timeout, RecordingReporter};

use std::error::Error;
use std::time::Duration;

use tokio::sync::mpsc;

use rollsim::engine::{RunOutcome, Runtime, RuntimeEvent, RuntimeOptions};
use rollsim::errors::RollsimError;
use rollsim::report::NullReporter;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn runtime_reports_every_tick_and_finishes() -> TestResult {
    init_tracing();
    let (_tx, rx) = mpsc::channel::<RuntimeEvent>(1);
    let reporter = RecordingReporter::new();

    let runtime = Runtime::new(
        uniform_simulation(10, 2, 2),
        RuntimeOptions::default(),
        rx,
        reporter.clone(),
    );
    let report = with_timeout(runtime.run()).await?;

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.ticks, 16);

    let ticks = reporter.ticks();
    assert_eq!(ticks.len(), 16);
    assert_eq!(ticks.last().map(|s| s.complete), Some(true));
    assert!(ticks[..15].iter().all(|s| !s.complete));
    assert_eq!(reporter.finished(), Some(report));

    Ok(())
}

#[tokio::test]
async fn queued_shutdown_stops_before_the_first_tick() -> TestResult {
    init_tracing();
    let (tx, rx) = mpsc::channel::<RuntimeEvent>(1);
    tx.send(RuntimeEvent::ShutdownRequested).await?;

    let reporter = RecordingReporter::new();
    let runtime = Runtime::new(
        uniform_simulation(3, 1, 1),
        RuntimeOptions::default(),
        rx,
        reporter.clone(),
    );
    let report = with_timeout(runtime.run()).await?;

    assert_eq!(report.outcome, RunOutcome::Interrupted);
    assert_eq!(report.ticks, 0);
    assert!(reporter.ticks().is_empty());
    assert_eq!(report.final_counts.old, 3);

    Ok(())
}

#[tokio::test]
async fn shutdown_interrupts_a_paced_run() -> TestResult {
    init_tracing();
    let (tx, rx) = mpsc::channel::<RuntimeEvent>(1);

    let options = RuntimeOptions {
        max_ticks: None,
        tick_interval: Duration::from_millis(20),
    };
    let runtime = Runtime::new(uniform_simulation(50, 5, 1), options, rx, NullReporter);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(70)).await;
        let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
    });

    let report = with_timeout(runtime.run()).await?;
    assert_eq!(report.outcome, RunOutcome::Interrupted);
    assert!(report.ticks >= 1);
    assert!(report.final_counts.old > 0);

    Ok(())
}

#[tokio::test]
async fn explicit_ceiling_stops_a_non_converging_run() {
    init_tracing();
    let (_tx, rx) = mpsc::channel::<RuntimeEvent>(1);

    let options = RuntimeOptions {
        max_ticks: Some(12),
        tick_interval: Duration::ZERO,
    };
    let reporter = RecordingReporter::new();
    let runtime = Runtime::new(uniform_simulation(2, 1, 0), options, rx, reporter.clone());

    match with_timeout(runtime.run()).await {
        Err(RollsimError::TickLimitExceeded { limit, counts }) => {
            assert_eq!(limit, 12);
            assert_eq!(counts.old, 2);
        }
        other => panic!("expected TickLimitExceeded, got {other:?}"),
    }
    assert_eq!(reporter.ticks().len(), 12);
    // A failed run is reported through the error, not as a finished run.
    assert!(reporter.finished().is_none());
}

#[tokio::test]
async fn closed_event_channel_still_runs_to_completion() -> TestResult {
    init_tracing();
    let (tx, rx) = mpsc::channel::<RuntimeEvent>(1);
    drop(tx);

    let runtime = Runtime::new(
        uniform_simulation(4, 1, 2),
        RuntimeOptions::default(),
        rx,
        NullReporter,
    );
    let report = with_timeout(runtime.run()).await?;
    assert!(report.is_complete());

    Ok(())
}
