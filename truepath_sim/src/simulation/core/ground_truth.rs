// truepath_sim/src/simulation/core/ground_truth.rs

use truepath_core::prelude::{Control, MotionModel, Pose, UnicycleModel};

use crate::simulation::config::structs::MotionProfile;

/// The reference motion the synthetic sensors observe and the estimators are scored against.
///
/// Entry `k` describes step `k`: the sample time `k * dt`, the true inputs
/// applied during the step, and the pose at the end of it.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruth {
    pub times: Vec<f64>,
    pub poses: Vec<Pose>,
    pub angular_rates: Vec<f64>,
    pub speeds: Vec<f64>,
}

impl GroundTruth {
    /// Integrates the profile from the origin with the same process model the
    /// estimators use.
    pub fn generate(profile: &MotionProfile, dt: f64, horizon: usize) -> Self {
        let model = UnicycleModel;
        let mut truth = Self {
            times: Vec::with_capacity(horizon),
            poses: Vec::with_capacity(horizon),
            angular_rates: Vec::with_capacity(horizon),
            speeds: Vec::with_capacity(horizon),
        };

        let mut pose = Pose::default();
        for k in 0..horizon {
            let t = k as f64 * dt;
            let control = Control {
                angular_rate: profile.turn_rate_at(t),
                speed: profile.speed,
            };
            pose = model.predict(&pose, &control, dt);

            truth.times.push(t);
            truth.poses.push(pose);
            truth.angular_rates.push(control.angular_rate);
            truth.speeds.push(control.speed);
        }
        truth
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_profile_shape() {
        let truth = GroundTruth::generate(&MotionProfile::default(), 0.1, 600);
        assert_eq!(truth.len(), 600);

        // Straight along +x until the turn starts.
        let before_turn = &truth.poses[199];
        assert_abs_diff_eq!(before_turn.theta, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(before_turn.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(before_turn.x, 40.0, epsilon = 1e-9);

        // The turn window is open, so only steps with 20 < t < 40 turn.
        let turning = truth.angular_rates.iter().filter(|&&w| w > 0.0).count();
        assert!((199..=200).contains(&turning), "{turning} turning steps");

        let last = truth.poses.last().unwrap();
        assert_abs_diff_eq!(last.theta, 0.1 * 0.1 * turning as f64, epsilon = 1e-9);
        assert!(truth.speeds.iter().all(|&v| v == 2.0));
    }
}
