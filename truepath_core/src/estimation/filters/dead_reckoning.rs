// truepath_core/src/estimation/filters/dead_reckoning.rs

use tracing::debug;

use crate::config::EstimatorConfig;
use crate::error::{ConfigError, EstimatorError};
use crate::estimation::{FilterPhase, StateEstimator};
use crate::models::motion::{MotionModel, UnicycleModel};
use crate::types::{Pose, SensorSample, Trajectory};

/// Integrates gyroscope and wheel speed only. No covariance, no corrections;
/// position fixes in the samples are ignored. Kept as a comparison baseline.
#[derive(Debug, Clone)]
pub struct DeadReckoning {
    dt: f64,
    dynamics: Box<dyn MotionModel>,
    phase: FilterPhase,
    pose: Pose,
    trajectory: Trajectory,
}

impl DeadReckoning {
    pub fn new(config: &EstimatorConfig) -> Result<Self, ConfigError> {
        Self::with_model(config, Box::new(UnicycleModel))
    }

    pub fn with_model(
        config: &EstimatorConfig,
        dynamics: Box<dyn MotionModel>,
    ) -> Result<Self, ConfigError> {
        config.validate_timing()?;
        Ok(Self {
            dt: config.dt,
            dynamics,
            phase: FilterPhase::Uninitialized,
            pose: Pose::default(),
            trajectory: Trajectory::with_horizon(config.horizon),
        })
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }
}

impl StateEstimator for DeadReckoning {
    fn process(&mut self, sample: &SensorSample) -> Result<Pose, EstimatorError> {
        match self.phase {
            FilterPhase::Done => {
                return Err(EstimatorError::HorizonExhausted {
                    horizon: self.trajectory.horizon(),
                })
            }
            FilterPhase::Uninitialized => {
                self.pose = Pose::default();
                self.phase = FilterPhase::Running;
            }
            FilterPhase::Running => {}
        }

        let next = self.dynamics.predict(&self.pose, &sample.control(), self.dt);
        self.trajectory.record(next)?;
        self.pose = next;

        if self.trajectory.is_complete() {
            self.phase = FilterPhase::Done;
            debug!(steps = self.trajectory.len(), "dead reckoning reached end of horizon");
        }
        Ok(next)
    }

    fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    fn phase(&self) -> FilterPhase {
        self.phase
    }
}
