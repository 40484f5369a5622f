// truepath_sim/src/simulation/sensors/wheel.rs

use rand_distr::{Distribution, Normal};

use crate::error::SimError;
use crate::simulation::config::structs::WheelConfig;
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::sensors::noise_distribution;

/// Wheel-encoder speed with Gaussian noise standing in for slip and quantization.
#[derive(Debug, Clone)]
pub struct WheelSpeedSensor {
    noise_dist: Normal<f64>,
}

impl WheelSpeedSensor {
    pub fn new(config: &WheelConfig) -> Result<Self, SimError> {
        let noise_dist = noise_distribution("wheel", config.noise_stddev)?;
        Ok(Self { noise_dist })
    }

    pub fn measure(&self, true_speed: f64, rng: &mut SimulationRng) -> f64 {
        true_speed + self.noise_dist.sample(&mut rng.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_noise_reports_true_speed() {
        let sensor = WheelSpeedSensor::new(&WheelConfig { noise_stddev: 0.0 }).unwrap();
        let mut rng = SimulationRng::from_seed(2);
        assert_eq!(sensor.measure(2.0, &mut rng), 2.0);
    }

    #[test]
    fn test_rejects_negative_noise() {
        let config = WheelConfig { noise_stddev: -0.2 };
        assert!(matches!(
            WheelSpeedSensor::new(&config),
            Err(SimError::Noise { sensor: "wheel", .. })
        ));
    }
}
