// truepath_core/src/estimation/ekf.rs

use nalgebra::{Matrix3, Vector2};

use crate::error::CorrectionError;
use crate::estimation::covariance::propagate_covariance;
use crate::models::measurement::MeasurementModel;
use crate::models::motion::MotionModel;
use crate::types::{Control, GaussianPose, Pose};

/// PURE FUNCTION: Performs one EKF prediction step.
/// Takes a belief and returns the predicted belief. It has no side effects.
pub fn ekf_predict(
    current: &GaussianPose,
    dynamics: &dyn MotionModel,
    control: &Control,
    dt: f64,
    process_noise_q: &Matrix3<f64>,
) -> GaussianPose {
    let prediction = dynamics.propagate(&current.pose, control, dt);
    let covariance =
        propagate_covariance(&current.covariance, &prediction.jacobian, process_noise_q);

    GaussianPose {
        pose: prediction.pose,
        covariance,
    }
}

/// PURE FUNCTION: Performs one EKF measurement update step.
/// Takes a predicted belief and returns the corrected one. It has no side effects.
pub fn ekf_update(
    predicted: &GaussianPose,
    model: &dyn MeasurementModel,
    z: &Vector2<f64>,
) -> Result<GaussianPose, CorrectionError> {
    let x_priori = predicted.pose.to_vector();
    let p_priori = &predicted.covariance;

    let h_jacobian = model.calculate_jacobian(&x_priori);
    let z_pred = model.predict_measurement(&x_priori);
    let r_matrix = model.get_r();

    // Standard EKF update equations
    let y = z - z_pred; // Innovation
    let s = h_jacobian * p_priori * h_jacobian.transpose() + r_matrix;
    let s_inv = s
        .try_inverse()
        .ok_or(CorrectionError::SingularInnovation)?;

    let k_gain = p_priori * h_jacobian.transpose() * s_inv;
    let new_x = x_priori + k_gain * y;
    let new_p = (Matrix3::identity() - k_gain * h_jacobian) * p_priori;

    if new_x.iter().chain(new_p.iter()).any(|v| !v.is_finite()) {
        return Err(CorrectionError::NonFiniteState);
    }

    Ok(GaussianPose {
        pose: Pose::from_vector(&new_x),
        covariance: new_p,
    })
}
