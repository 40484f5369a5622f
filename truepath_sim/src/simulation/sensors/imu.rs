// truepath_sim/src/simulation/sensors/imu.rs

use rand_distr::{Distribution, Normal};

use crate::error::SimError;
use crate::simulation::config::structs::ImuConfig;
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::sensors::noise_distribution;

/// Simulated yaw-rate gyroscope with white noise and a bias that ramps
/// linearly from zero at the first step to `bias_drift_final` at the last.
#[derive(Debug, Clone)]
pub struct ImuSensor {
    noise_dist: Normal<f64>,
    bias_drift_final: f64,
    horizon: usize,
}

impl ImuSensor {
    pub fn new(config: &ImuConfig, horizon: usize) -> Result<Self, SimError> {
        let noise_dist = noise_distribution("imu", config.noise_stddev)?;
        Ok(Self {
            noise_dist,
            bias_drift_final: config.bias_drift_final,
            horizon,
        })
    }

    pub fn bias_at(&self, step: usize) -> f64 {
        if self.horizon < 2 {
            return 0.0;
        }
        self.bias_drift_final * step as f64 / (self.horizon - 1) as f64
    }

    pub fn measure(&self, true_rate: f64, step: usize, rng: &mut SimulationRng) -> f64 {
        true_rate + self.bias_at(step) + self.noise_dist.sample(&mut rng.0)
    }
}
