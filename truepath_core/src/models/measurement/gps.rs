// truepath_core/src/models/measurement/gps.rs

use nalgebra::{Matrix2, Matrix2x3, Vector2};

use crate::models::measurement::MeasurementModel;
use crate::types::StateVector;

/// Absolute position sensor observing `x` and `y`. Heading is never observed.
///
/// The model is linear, so `H` and `R` are built once and reused every step.
#[derive(Debug, Clone)] // Make sure it's cloneable for the dyn-clone
pub struct GpsPositionModel {
    r_matrix: Matrix2<f64>,
    h_matrix: Matrix2x3<f64>,
}

impl GpsPositionModel {
    pub fn new(r_matrix: Matrix2<f64>) -> Self {
        #[rustfmt::skip]
        let h_matrix = Matrix2x3::new(
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
        );
        Self { r_matrix, h_matrix }
    }
}

impl MeasurementModel for GpsPositionModel {
    fn get_r(&self) -> &Matrix2<f64> {
        &self.r_matrix
    }

    fn predict_measurement(&self, state: &StateVector) -> Vector2<f64> {
        self.h_matrix * state
    }

    fn calculate_jacobian(&self, _state: &StateVector) -> Matrix2x3<f64> {
        self.h_matrix
    }
}
