// truepath_core/src/models/motion.rs

use dyn_clone::DynClone;
use nalgebra::Matrix3;
use std::fmt::Debug;

use crate::types::{Control, Pose};

/// A predicted pose together with the process Jacobian it was linearized with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub pose: Pose,
    /// F = ∂f/∂x, evaluated consistently with `pose`.
    pub jacobian: Matrix3<f64>,
}

// --- MOTION MODEL TRAIT ---
// Represents the discrete process model of the vehicle. `x_k = f(x_{k-1}, u_k)`
/// Advances a pose by one time step from gyroscope and wheel-speed inputs.
///
/// Implementations are stateless; the same inputs always give the same output.
pub trait MotionModel: DynClone + Debug + Send + Sync {
    /// Returns the pose after one step of length `dt` under `control`.
    fn predict(&self, pose: &Pose, control: &Control, dt: f64) -> Pose;

    /// Calculates the 3x3 Jacobian `F = ∂f/∂x` of `predict` at `pose`.
    fn calculate_jacobian(&self, pose: &Pose, control: &Control, dt: f64) -> Matrix3<f64>;

    /// Prediction and Jacobian in one call.
    fn propagate(&self, pose: &Pose, control: &Control, dt: f64) -> Prediction {
        Prediction {
            pose: self.predict(pose, control, dt),
            jacobian: self.calculate_jacobian(pose, control, dt),
        }
    }
}

// This macro automatically generates the implementation of `Clone` for `Box<dyn MotionModel>`.
dyn_clone::clone_trait_object!(MotionModel);

// --- Heading-first unicycle ---
// Forward Euler in which the heading is advanced before the position, so the
// position update uses the *predicted* heading.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicycleModel;

impl UnicycleModel {
    fn predicted_heading(pose: &Pose, control: &Control, dt: f64) -> f64 {
        pose.theta + control.angular_rate * dt
    }
}

impl MotionModel for UnicycleModel {
    fn predict(&self, pose: &Pose, control: &Control, dt: f64) -> Pose {
        let theta = Self::predicted_heading(pose, control, dt);
        Pose {
            x: pose.x + control.speed * theta.cos() * dt,
            y: pose.y + control.speed * theta.sin() * dt,
            theta,
        }
    }

    fn calculate_jacobian(&self, pose: &Pose, control: &Control, dt: f64) -> Matrix3<f64> {
        // Linearized at the predicted heading, matching `predict`.
        let theta = Self::predicted_heading(pose, control, dt);
        let v = control.speed;
        #[rustfmt::skip]
        let jacobian = Matrix3::new(
            1.0, 0.0, -v * theta.sin() * dt,
            0.0, 1.0, v * theta.cos() * dt,
            0.0, 0.0, 1.0,
        );
        jacobian
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_heading_is_updated_before_position() {
        let model = UnicycleModel;
        let control = Control {
            angular_rate: FRAC_PI_2,
            speed: 1.0,
        };
        // One step of 1 s turns a quarter circle; the position moves along the
        // new heading (+y), not the old one (+x).
        let next = model.predict(&Pose::default(), &control, 1.0);
        assert_abs_diff_eq!(next.theta, FRAC_PI_2, epsilon = EPSILON);
        assert_abs_diff_eq!(next.x, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(next.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_jacobian_matches_finite_differences() {
        let model = UnicycleModel;
        let pose = Pose::new(3.0, -1.0, 0.7);
        let control = Control {
            angular_rate: 0.2,
            speed: 2.5,
        };
        let dt = 0.1;
        let jac = model.calculate_jacobian(&pose, &control, dt);

        let h = 1e-6;
        for col in 0..3 {
            let mut plus = pose.to_vector();
            let mut minus = pose.to_vector();
            plus[col] += h;
            minus[col] -= h;
            let f_plus = model.predict(&Pose::from_vector(&plus), &control, dt).to_vector();
            let f_minus = model.predict(&Pose::from_vector(&minus), &control, dt).to_vector();
            let numeric = (f_plus - f_minus) / (2.0 * h);
            for row in 0..3 {
                assert_abs_diff_eq!(jac[(row, col)], numeric[row], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_straight_line_matches_closed_form() {
        let model = UnicycleModel;
        let control = Control {
            angular_rate: 0.0,
            speed: 3.0,
        };
        let dt = 0.05;
        let mut pose = Pose::default();
        for k in 1..=200 {
            pose = model.predict(&pose, &control, dt);
            let t = k as f64 * dt;
            assert_abs_diff_eq!(pose.x, 3.0 * t, epsilon = 1e-9);
            assert_abs_diff_eq!(pose.y, 0.0, epsilon = EPSILON);
            assert_abs_diff_eq!(pose.theta, 0.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_propagate_bundles_prediction_and_jacobian() {
        let model = UnicycleModel;
        let pose = Pose::new(1.0, 2.0, 0.5);
        let control = Control {
            angular_rate: -0.3,
            speed: 1.2,
        };
        let prediction = model.propagate(&pose, &control, 0.1);
        assert_eq!(prediction.pose, model.predict(&pose, &control, 0.1));
        assert_eq!(
            prediction.jacobian,
            model.calculate_jacobian(&pose, &control, 0.1)
        );
    }
}
