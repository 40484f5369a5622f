// truepath_core/src/error.rs

use thiserror::Error;

/// Rejected estimator configuration. Raised at construction, before any step runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("horizon must contain at least one step")]
    EmptyHorizon,

    #[error("horizon of {horizon} steps exceeds the supported maximum of {max}")]
    HorizonTooLarge { horizon: usize, max: usize },

    #[error("process noise entry {index} must be non-negative and finite, got {value}")]
    InvalidProcessNoise { index: usize, value: f64 },

    #[error("measurement noise entry {index} must be positive and finite, got {value}")]
    InvalidMeasurementNoise { index: usize, value: f64 },

    #[error("initial covariance scale must be positive and finite, got {0}")]
    InvalidInitialCovariance(f64),
}

/// Numerical failure inside a single measurement correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CorrectionError {
    #[error("innovation covariance is singular")]
    SingularInnovation,

    #[error("correction produced a non-finite state or covariance")]
    NonFiniteState,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("invalid estimator configuration: {0}")]
    Config(#[from] ConfigError),

    /// The step was not applied; the estimator still holds its previous belief.
    #[error("measurement correction failed at step {step}")]
    Correction {
        step: usize,
        #[source]
        source: CorrectionError,
    },

    #[error("estimator already completed its horizon of {horizon} steps")]
    HorizonExhausted { horizon: usize },
}
