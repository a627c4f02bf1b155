// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fleet;
pub mod logging;
pub mod report;
pub mod types;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::engine::{convergence_bound, RunOutcome, Runtime, RuntimeEvent, Simulation};
use crate::errors::Result;
use crate::fleet::Environment;
use crate::report::LogReporter;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution (file, defaults, CLI overrides)
/// - fleet + simulation construction
/// - the async runtime and its reporter
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = config::resolve(args.config.as_deref(), &args.overrides())?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let simulation = build_simulation(&cfg);

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(4);

    // Ctrl-C → graceful shutdown.
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = rt_tx.send(RuntimeEvent::ShutdownRequested).await;
    });

    info!("running simulation");
    let runtime = Runtime::new(simulation, cfg.runtime_options(), rt_rx, LogReporter);
    let report = runtime.run().await?;

    match report.outcome {
        RunOutcome::Completed => println!(
            "rollout complete: {} machines updated in {} ticks (peak {} updating)",
            report.final_counts.total(),
            report.ticks,
            report.peak_updating
        ),
        RunOutcome::Interrupted => println!(
            "rollout interrupted after {} ticks ({})",
            report.ticks, report.final_counts
        ),
    }
    Ok(())
}

/// Build the fleet described by `cfg` and wrap it in a simulation.
pub fn build_simulation(cfg: &ConfigFile) -> Simulation {
    let environment = Environment::from_delays(cfg.machine_delays());
    Simulation::new(environment, cfg.concurrency())
}

/// Print the resolved configuration without running anything.
fn print_dry_run(cfg: &ConfigFile) {
    let delays = cfg.machine_delays();
    let bound = convergence_bound(delays.iter().copied(), cfg.concurrency());

    println!("rollsim dry-run");
    println!("  simulation.machines = {}", cfg.fleet_size());
    println!("  simulation.update_delay = {}", cfg.simulation.update_delay);
    println!("  simulation.concurrency = {}", cfg.concurrency());
    match cfg.simulation.max_ticks {
        Some(max) => println!("  simulation.max_ticks = {max}"),
        None => println!("  simulation.max_ticks = (convergence bound)"),
    }
    println!(
        "  simulation.tick_interval_ms = {}",
        cfg.simulation.tick_interval_ms
    );
    if let Some(bound) = bound {
        println!("  convergence bound = {bound} ticks");
    }

    if !cfg.machine.is_empty() {
        println!();
        println!("machines ({}):", delays.len());
        for (idx, delay) in delays.iter().enumerate() {
            println!("  - machine-{idx}: update_delay = {delay}");
        }
    }

    debug!("dry-run complete (no simulation)");
}
