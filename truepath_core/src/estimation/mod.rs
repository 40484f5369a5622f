// truepath_core/src/estimation/mod.rs

use crate::error::EstimatorError;
use crate::types::{Pose, SensorSample, Trajectory};

/// Lifecycle of an estimator over one bounded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPhase {
    /// No step has been processed; the initial belief is set on the first one.
    #[default]
    Uninitialized,
    Running,
    /// The configured horizon has been filled. Further steps are rejected.
    Done,
}

/// The contract for any algorithm that performs the "State Estimator" role.
///
/// One call to `process` handles exactly one time step to completion. A given
/// instance must not be shared across threads without external synchronization.
pub trait StateEstimator: Send {
    /// Consumes the sample for the next step and returns the resulting pose.
    fn process(&mut self, sample: &SensorSample) -> Result<Pose, EstimatorError>;

    /// All poses produced so far, one per processed step.
    fn trajectory(&self) -> &Trajectory;

    fn phase(&self) -> FilterPhase;

    /// Feeds every sample in order, stopping at the first error.
    fn run<'a, I>(&mut self, samples: I) -> Result<&Trajectory, EstimatorError>
    where
        I: IntoIterator<Item = &'a SensorSample>,
        Self: Sized,
    {
        for sample in samples {
            self.process(sample)?;
        }
        Ok(self.trajectory())
    }
}

pub mod covariance;
pub mod ekf;
pub mod filters;
