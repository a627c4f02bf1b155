// src/config/mod.rs

//! Configuration loading and validation for rollsim.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like a positive concurrency limit (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve};
pub use model::{
    ConfigFile, MachineConfig, RawConfigFile, SimulationOverrides, SimulationSection,
};
