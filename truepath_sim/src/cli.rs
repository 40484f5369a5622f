// truepath_sim/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

use crate::simulation::config::structs::{ScenarioConfig, MAX_SEED};

/// TruePath: EKF localization under GNSS outages.
///
/// Runs a synthetic scenario, fuses gyroscope, wheel speed and GPS with an
/// Extended Kalman Filter, and compares it with pure dead reckoning.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/truepath_demo.toml")]
    pub scenario: PathBuf,

    /// Seed for the sensor noise. Overrides the scenario's seed.
    #[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_SEED))]
    pub seed: Option<u64>,

    /// Keep GPS available for the whole run.
    #[arg(long, default_value_t = false)]
    pub no_dropout: bool,

    /// Write the evaluation report to this TOML file.
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Enable debug logging for the TruePath crates.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Applies the command-line overrides on top of the loaded scenario.
    pub fn apply_overrides(&self, config: &mut ScenarioConfig) {
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if self.no_dropout {
            config.sensors.gps.dropout.enabled = false;
        }
    }
}
