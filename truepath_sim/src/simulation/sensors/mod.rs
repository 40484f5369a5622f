// truepath_sim/src/simulation/sensors/mod.rs

pub mod gps;
pub mod imu;
pub mod wheel;

use rand_distr::{Normal, NormalError};
use truepath_core::types::SensorSample;

use crate::error::SimError;
use crate::simulation::config::structs::SensorsConfig;
use crate::simulation::core::ground_truth::GroundTruth;
use crate::simulation::core::prng::SimulationRng;
use gps::GpsSensor;
use imu::ImuSensor;
use wheel::WheelSpeedSensor;

/// Zero-mean Gaussian noise for `sensor`. `Normal::new` only rejects a
/// non-finite deviation, so negative ones are caught here.
pub(crate) fn noise_distribution(
    sensor: &'static str,
    stddev: f64,
) -> Result<Normal<f64>, SimError> {
    if !(stddev.is_finite() && stddev >= 0.0) {
        return Err(SimError::Noise {
            sensor,
            source: NormalError::BadVariance,
        });
    }
    Normal::new(0.0, stddev).map_err(|source| SimError::Noise { sensor, source })
}

/// The three synthetic sensors, sampled together once per step.
#[derive(Debug, Clone)]
pub struct SensorSuite {
    pub gps: GpsSensor,
    pub imu: ImuSensor,
    pub wheel: WheelSpeedSensor,
}

impl SensorSuite {
    pub fn new(config: &SensorsConfig, horizon: usize) -> Result<Self, SimError> {
        Ok(Self {
            gps: GpsSensor::new(&config.gps)?,
            imu: ImuSensor::new(&config.imu, horizon)?,
            wheel: WheelSpeedSensor::new(&config.wheel)?,
        })
    }

    /// One `SensorSample` per ground-truth step. All randomness comes from `rng`,
    /// drawn in a fixed order (gps x, gps y, imu, wheel) each step.
    pub fn sample(&self, truth: &GroundTruth, rng: &mut SimulationRng) -> Vec<SensorSample> {
        let mut samples = Vec::with_capacity(truth.len());
        for (k, pose) in truth.poses.iter().enumerate() {
            let position_fix = self.gps.measure(pose, truth.times[k], rng);
            let angular_rate = self.imu.measure(truth.angular_rates[k], k, rng);
            let speed = self.wheel.measure(truth.speeds[k], rng);
            samples.push(SensorSample::new(angular_rate, speed, position_fix));
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::structs::MotionProfile;

    #[test]
    fn test_noise_distribution_rejects_bad_deviations() {
        assert!(noise_distribution("gps", 0.0).is_ok());
        for stddev in [-0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                noise_distribution("wheel", stddev),
                Err(SimError::Noise { sensor: "wheel", .. })
            ));
        }
    }

    #[test]
    fn test_suite_reports_the_offending_sensor() {
        let mut config = SensorsConfig::default();
        config.imu.noise_stddev = -0.01;
        assert!(matches!(
            SensorSuite::new(&config, 10),
            Err(SimError::Noise { sensor: "imu", .. })
        ));
    }

    #[test]
    fn test_samples_are_reproducible_from_seed() {
        let truth = GroundTruth::generate(&MotionProfile::default(), 0.1, 600);
        let suite = SensorSuite::new(&SensorsConfig::default(), truth.len()).unwrap();

        let a = suite.sample(&truth, &mut SimulationRng::from_seed(5));
        let b = suite.sample(&truth, &mut SimulationRng::from_seed(5));
        let c = suite.sample(&truth, &mut SimulationRng::from_seed(6));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_outage_only_removes_fixes() {
        let truth = GroundTruth::generate(&MotionProfile::default(), 0.1, 600);
        let mut config = SensorsConfig::default();
        let with_outage = SensorSuite::new(&config, truth.len())
            .unwrap()
            .sample(&truth, &mut SimulationRng::from_seed(8));
        config.gps.dropout.enabled = false;
        let without_outage = SensorSuite::new(&config, truth.len())
            .unwrap()
            .sample(&truth, &mut SimulationRng::from_seed(8));

        let missing = with_outage.iter().filter(|s| s.position_fix.is_none()).count();
        assert_eq!(missing, 199);
        for (a, b) in with_outage.iter().zip(&without_outage) {
            assert_eq!(a.control(), b.control());
            if a.position_fix.is_some() {
                assert_eq!(a.position_fix, b.position_fix);
            }
        }
    }
}
