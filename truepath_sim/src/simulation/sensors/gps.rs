// truepath_sim/src/simulation/sensors/gps.rs

use rand_distr::{Distribution, Normal};
use truepath_core::types::{Pose, PositionFix};

use crate::error::SimError;
use crate::simulation::config::structs::{GpsConfig, TimeWindow};
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::sensors::noise_distribution;

/// Simulated GNSS receiver: true position plus independent Gaussian noise per
/// axis, with no reading at all during the configured outage.
#[derive(Debug, Clone)]
pub struct GpsSensor {
    // Store the noise distribution for efficiency
    noise_dist: Normal<f64>,
    outage: Option<TimeWindow>,
}

impl GpsSensor {
    pub fn new(config: &GpsConfig) -> Result<Self, SimError> {
        let noise_dist = noise_distribution("gps", config.noise_stddev)?;
        let dropout = &config.dropout;
        Ok(Self {
            noise_dist,
            outage: dropout.enabled.then(|| dropout.window()),
        })
    }

    /// Produces the fix for the step sampled at time `t`.
    ///
    /// Noise is drawn even inside the outage so that toggling the dropout does
    /// not shift the random stream seen by the other sensors.
    pub fn measure(&self, truth: &Pose, t: f64, rng: &mut SimulationRng) -> Option<PositionFix> {
        let fix = PositionFix::new(
            truth.x + self.noise_dist.sample(&mut rng.0),
            truth.y + self.noise_dist.sample(&mut rng.0),
        );

        match &self.outage {
            Some(window) if window.contains(t) => None,
            _ => Some(fix),
        }
    }
}
