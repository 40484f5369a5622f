// truepath_core/src/estimation/filters/ekf.rs

use nalgebra::Matrix3;
use tracing::{debug, trace, warn};

use crate::config::EstimatorConfig;
use crate::error::{ConfigError, EstimatorError};
use crate::estimation::ekf::{ekf_predict, ekf_update};
use crate::estimation::{FilterPhase, StateEstimator};
use crate::models::measurement::gps::GpsPositionModel;
use crate::models::measurement::MeasurementModel;
use crate::models::motion::{MotionModel, UnicycleModel};
use crate::types::{Covariance, GaussianPose, Pose, SensorSample, Trajectory};

/// A concrete implementation of an Extended Kalman Filter over `[x, y, theta]`.
///
/// Every step predicts with the motion model, propagates the covariance, and
/// corrects with the position model only when the sample carries a fix.
#[derive(Debug, Clone)]
pub struct ExtendedKalmanFilter {
    config: EstimatorConfig,
    /// The process noise covariance matrix (Q), modeling uncertainty in the dynamics.
    process_noise_q: Matrix3<f64>,
    dynamics: Box<dyn MotionModel>,
    measurement: Box<dyn MeasurementModel>,
    phase: FilterPhase,
    /// The single live belief (x, P).
    state: GaussianPose,
    trajectory: Trajectory,
}

impl ExtendedKalmanFilter {
    /// Creates an EKF with the heading-first unicycle and a GPS position model.
    pub fn new(config: EstimatorConfig) -> Result<Self, ConfigError> {
        let measurement = GpsPositionModel::new(config.measurement_noise_matrix());
        Self::with_models(config, Box::new(UnicycleModel), Box::new(measurement))
    }

    /// Creates an EKF with caller-supplied models. The config is still validated
    /// in full, even though `measurement` brings its own `R`.
    pub fn with_models(
        config: EstimatorConfig,
        dynamics: Box<dyn MotionModel>,
        measurement: Box<dyn MeasurementModel>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            process_noise_q: config.process_noise_matrix(),
            state: Self::initial_state(&config),
            trajectory: Trajectory::with_horizon(config.horizon),
            phase: FilterPhase::Uninitialized,
            config,
            dynamics,
            measurement,
        })
    }

    fn initial_state(config: &EstimatorConfig) -> GaussianPose {
        GaussianPose::new(Pose::default(), config.initial_covariance())
    }

    /// Discards the run and returns to `Uninitialized` with an empty trajectory.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config);
        self.trajectory = Trajectory::with_horizon(self.config.horizon);
        self.phase = FilterPhase::Uninitialized;
    }

    pub fn pose(&self) -> Pose {
        self.state.pose
    }

    pub fn covariance(&self) -> &Covariance {
        &self.state.covariance
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Index of the next step to be processed.
    pub fn step_index(&self) -> usize {
        self.trajectory.len()
    }
}

impl StateEstimator for ExtendedKalmanFilter {
    fn process(&mut self, sample: &SensorSample) -> Result<Pose, EstimatorError> {
        let step = self.step_index();

        match self.phase {
            FilterPhase::Done => {
                return Err(EstimatorError::HorizonExhausted {
                    horizon: self.config.horizon,
                })
            }
            FilterPhase::Uninitialized => {
                self.state = Self::initial_state(&self.config);
                self.phase = FilterPhase::Running;
                debug!(
                    horizon = self.config.horizon,
                    dt = self.config.dt,
                    "EKF initialized at origin"
                );
            }
            FilterPhase::Running => {}
        }

        // 1. PREDICT: motion model and covariance propagation.
        let predicted = ekf_predict(
            &self.state,
            self.dynamics.as_ref(),
            &sample.control(),
            self.config.dt,
            &self.process_noise_q,
        );
        trace!(
            step,
            x = predicted.pose.x,
            y = predicted.pose.y,
            theta = predicted.pose.theta,
            "predicted"
        );

        // 2. UPDATE: only when the position sensor produced a reading.
        let next = match &sample.position_fix {
            Some(fix) => {
                match ekf_update(&predicted, self.measurement.as_ref(), &fix.to_vector()) {
                    Ok(corrected) => {
                        debug!(
                            step,
                            dx = corrected.pose.x - predicted.pose.x,
                            dy = corrected.pose.y - predicted.pose.y,
                            "applied position correction"
                        );
                        corrected
                    }
                    Err(source) => {
                        // Nothing has been committed yet, so the belief stays at step - 1.
                        warn!(step, error = %source, "position correction failed");
                        return Err(EstimatorError::Correction { step, source });
                    }
                }
            }
            None => predicted,
        };

        // 3. Commit.
        self.trajectory.record(next.pose)?;
        self.state = next;

        if self.trajectory.is_complete() {
            self.phase = FilterPhase::Done;
            debug!(
                steps = self.trajectory.len(),
                trace_p = self.state.covariance.trace(),
                "EKF reached end of horizon"
            );
        }

        Ok(next.pose)
    }

    fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    fn phase(&self) -> FilterPhase {
        self.phase
    }
}
