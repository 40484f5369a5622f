// truepath_core/src/models/measurement/mod.rs

use dyn_clone::DynClone;
use nalgebra::{Matrix2, Matrix2x3, Vector2};
use std::fmt::Debug;

use crate::types::StateVector;

// --- MEASUREMENT MODEL TRAIT ---
// Represents the mathematical model of a sensor. `z = h(x) + v`
pub trait MeasurementModel: DynClone + Debug + Send + Sync {
    /// Returns the measurement noise covariance matrix `R`.
    fn get_r(&self) -> &Matrix2<f64>;

    /// Predicts the ideal measurement `z_pred = h(x)` from the filter's state.
    fn predict_measurement(&self, state: &StateVector) -> Vector2<f64>;

    /// Calculates the measurement Jacobian `H = ∂h/∂x`.
    fn calculate_jacobian(&self, state: &StateVector) -> Matrix2x3<f64>;
}

// This macro automatically generates the implementation of `Clone` for `Box<dyn MeasurementModel>`.
dyn_clone::clone_trait_object!(MeasurementModel);

pub mod gps;
