// truepath_core/src/config.rs

use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Covariance;

/// Longest run an estimator accepts. Trajectory storage for the whole horizon
/// is reserved up front, so this bounds the allocation at construction.
pub const MAX_HORIZON: usize = 1_000_000;

/// Configuration of a single estimator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Duration of one step in seconds.
    pub dt: f64,
    /// Number of steps in the run. The trajectory holds exactly this many poses.
    pub horizon: usize,
    #[serde(default)]
    pub noise: NoiseConfig,
    /// P0 = I * scale.
    #[serde(default = "default_initial_covariance_scale")]
    pub initial_covariance_scale: f64,
}

/// Diagonal noise terms for the process (Q) and the position sensor (R).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseConfig {
    /// Diagonal of Q, ordered `[x, y, theta]`.
    pub process: [f64; 3],
    /// Diagonal of R, ordered `[x, y]`.
    pub measurement: [f64; 2],
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            process: [0.1, 0.1, 0.01],
            measurement: [2.0, 2.0],
        }
    }
}

fn default_initial_covariance_scale() -> f64 {
    1.0
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            horizon: 600,
            noise: NoiseConfig::default(),
            initial_covariance_scale: default_initial_covariance_scale(),
        }
    }
}

impl EstimatorConfig {
    /// Checks only the timing fields. Enough for estimators without a covariance.
    pub fn validate_timing(&self) -> Result<(), ConfigError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.dt));
        }
        if self.horizon == 0 {
            return Err(ConfigError::EmptyHorizon);
        }
        if self.horizon > MAX_HORIZON {
            return Err(ConfigError::HorizonTooLarge {
                horizon: self.horizon,
                max: MAX_HORIZON,
            });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_timing()?;

        for (index, &value) in self.noise.process.iter().enumerate() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidProcessNoise { index, value });
            }
        }
        for (index, &value) in self.noise.measurement.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidMeasurementNoise { index, value });
            }
        }

        let scale = self.initial_covariance_scale;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::InvalidInitialCovariance(scale));
        }
        Ok(())
    }

    /// Q, the per-step process noise.
    pub fn process_noise_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_diagonal(&Vector3::from(self.noise.process))
    }

    /// R, the position-fix noise.
    pub fn measurement_noise_matrix(&self) -> Matrix2<f64> {
        Matrix2::from_diagonal(&Vector2::from(self.noise.measurement))
    }

    pub fn initial_covariance(&self) -> Covariance {
        Covariance::identity() * self.initial_covariance_scale
    }
}
