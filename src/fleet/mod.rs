// src/fleet/mod.rs

//! The simulated fleet.
//!
//! - [`machine`] holds the per-server lifecycle state machine.
//! - [`environment`] wraps the fixed pool of machines and answers the
//!   queries the simulation needs to decide each tick.

pub mod environment;
pub mod machine;

pub use environment::{Environment, FleetCounts};
pub use machine::Machine;
