//! Command line interface for the bridge demo.

use std::path::PathBuf;

use bridge_core::{BridgeConfig, ConfigError};
use clap::Parser;

/// Physics bridge demo: a ball bouncing on a tilted slab.
#[derive(Parser, Debug)]
#[command(name = "viz")]
#[command(about = "Physics bridge demo with a debug-draw overlay")]
pub struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Display units per simulation meter
    #[arg(long)]
    pub units_per_meter: Option<f32>,

    /// Simulation steps between ball resets
    #[arg(long)]
    pub reset_interval: Option<u32>,

    /// Vertical gravity, m/s^2
    #[arg(long, allow_negative_numbers = true)]
    pub gravity_y: Option<f32>,

    /// Constraint solver iterations per step
    #[arg(long)]
    pub solver_iterations: Option<usize>,

    /// Window title
    #[arg(long, default_value = "Physics Bridge")]
    pub title: String,
}

impl Args {
    /// Loads the config file (or defaults), applies the flag overrides, and
    /// validates the result.
    pub fn resolve_config(&self) -> Result<BridgeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => BridgeConfig::from_file(path)?,
            None => BridgeConfig::default(),
        };
        if let Some(units_per_meter) = self.units_per_meter {
            config.units.units_per_meter = units_per_meter;
        }
        if let Some(reset_interval) = self.reset_interval {
            config.episode.reset_interval = reset_interval;
        }
        if let Some(gravity_y) = self.gravity_y {
            config.solver.gravity[1] = gravity_y;
        }
        if let Some(solver_iterations) = self.solver_iterations {
            config.solver.solver_iterations = solver_iterations;
        }
        config.validate()?;
        Ok(config)
    }
}
