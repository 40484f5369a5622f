// truepath_sim/src/error.rs

use std::path::PathBuf;
use thiserror::Error;
use truepath_core::error::{ConfigError, EstimatorError};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to load scenario: {0}")]
    Scenario(#[from] figment::Error),

    #[error("seed {seed} exceeds the largest reportable seed {max}")]
    SeedOutOfRange { seed: u64, max: u64 },

    #[error("invalid {sensor} noise parameters: {source}")]
    Noise {
        sensor: &'static str,
        #[source]
        source: rand_distr::NormalError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Estimator(#[from] EstimatorError),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write report to '{path}': {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
