// truepath_core/src/types.rs

use nalgebra::{Matrix3, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::EstimatorError;

// --- Core Type Aliases ---
/// The filter state vector, ordered `[x, y, theta]`.
pub type StateVector = Vector3<f64>;
/// The 3x3 uncertainty over `[x, y, theta]`.
pub type Covariance = Matrix3<f64>;

/// Position and heading of the vehicle in the fixed 2D world frame.
///
/// `theta` is accumulated without wrapping, so a vehicle that has turned
/// through 2 rad reports exactly that.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// The pose as the filter's state vector `[x, y, theta]`.
    pub fn to_vector(&self) -> StateVector {
        StateVector::new(self.x, self.y, self.theta)
    }

    pub fn from_vector(v: &StateVector) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Euclidean distance between the positions of two poses. Heading is ignored.
    pub fn distance_to(&self, other: &Pose) -> f64 {
        (self.position() - other.position()).norm()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }
}

/// An absolute position reading, e.g. a GPS fix projected into the world frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub x: f64,
    pub y: f64,
}

impl PositionFix {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<&Pose> for PositionFix {
    fn from(pose: &Pose) -> Self {
        Self::new(pose.x, pose.y)
    }
}

/// The driving inputs of the motion model for one step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Control {
    /// Yaw rate from the gyroscope (rad/s).
    pub angular_rate: f64,
    /// Longitudinal speed from the wheel encoder (m/s).
    pub speed: f64,
}

/// Everything the estimator receives for a single time step.
///
/// `position_fix` is `None` whenever the position sensor has no valid reading
/// (outage, or not yet acquired). That is the only case in which the filter
/// skips its correction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorSample {
    pub angular_rate: f64,
    pub speed: f64,
    #[serde(default)]
    pub position_fix: Option<PositionFix>,
}

impl SensorSample {
    pub fn new(angular_rate: f64, speed: f64, position_fix: Option<PositionFix>) -> Self {
        Self {
            angular_rate,
            speed,
            position_fix,
        }
    }

    pub fn control(&self) -> Control {
        Control {
            angular_rate: self.angular_rate,
            speed: self.speed,
        }
    }

    /// The same sample with its position fix dropped. Re-submitting this after a
    /// failed correction advances the filter on prediction alone.
    pub fn without_fix(&self) -> Self {
        Self {
            position_fix: None,
            ..*self
        }
    }
}

/// Mean and covariance of the pose belief. The estimator holds exactly one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianPose {
    pub pose: Pose,
    pub covariance: Covariance,
}

impl GaussianPose {
    pub fn new(pose: Pose, covariance: Covariance) -> Self {
        Self { pose, covariance }
    }
}

/// The ordered output of an estimator: one pose per time step.
///
/// Storage is reserved for the full horizon up front and each slot is written
/// exactly once, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    poses: Vec<Pose>,
    horizon: usize,
}

impl Trajectory {
    pub fn with_horizon(horizon: usize) -> Self {
        Self {
            poses: Vec::with_capacity(horizon),
            horizon,
        }
    }

    /// Appends the pose for the next step and returns its index.
    pub fn record(&mut self, pose: Pose) -> Result<usize, EstimatorError> {
        if self.is_complete() {
            return Err(EstimatorError::HorizonExhausted {
                horizon: self.horizon,
            });
        }
        self.poses.push(pose);
        Ok(self.poses.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&Pose> {
        self.poses.get(index)
    }

    pub fn last(&self) -> Option<&Pose> {
        self.poses.last()
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn is_complete(&self) -> bool {
        self.poses.len() >= self.horizon
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pose> {
        self.poses.iter()
    }

    pub fn as_slice(&self) -> &[Pose] {
        &self.poses
    }
}

impl Index<usize> for Trajectory {
    type Output = Pose;

    fn index(&self, index: usize) -> &Self::Output {
        &self.poses[index]
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Pose;
    type IntoIter = std::slice::Iter<'a, Pose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pose_vector_conversion() {
        let pose = Pose::new(1.5, -2.0, 0.3);
        let v = pose.to_vector();
        assert_eq!(v, StateVector::new(1.5, -2.0, 0.3));
        assert_eq!(Pose::from_vector(&v), pose);
    }

    #[test]
    fn test_pose_distance_ignores_heading() {
        let a = Pose::new(0.0, 0.0, 0.0);
        let b = Pose::new(3.0, 4.0, 1.2);
        assert_abs_diff_eq!(a.distance_to(&b), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_without_fix_keeps_controls() {
        let sample = SensorSample::new(0.1, 2.0, Some(PositionFix::new(1.0, 2.0)));
        let stripped = sample.without_fix();
        assert!(stripped.position_fix.is_none());
        assert_eq!(stripped.control(), sample.control());
    }

    #[test]
    fn test_trajectory_is_bounded_by_horizon() {
        let mut trajectory = Trajectory::with_horizon(2);
        assert_eq!(trajectory.record(Pose::default()).unwrap(), 0);
        assert_eq!(trajectory.record(Pose::new(1.0, 0.0, 0.0)).unwrap(), 1);
        assert!(trajectory.is_complete());
        assert_eq!(
            trajectory.record(Pose::default()),
            Err(EstimatorError::HorizonExhausted { horizon: 2 })
        );
        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory[1].x, 1.0);
    }
}
