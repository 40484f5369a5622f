// truepath_core/src/testing.rs

//! Test doubles shared by the unit tests here and by downstream crates
//! (enable the `test-utils` feature).

use nalgebra::{Matrix2, Matrix2x3, Vector2};

use crate::models::measurement::MeasurementModel;
use crate::types::StateVector;

/// A position model that observes nothing and reports zero noise, so every
/// innovation covariance it produces is singular.
#[derive(Debug, Clone)]
pub struct BlindPositionModel {
    r_matrix: Matrix2<f64>,
}

impl BlindPositionModel {
    pub fn new() -> Self {
        Self {
            r_matrix: Matrix2::zeros(),
        }
    }
}

impl Default for BlindPositionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementModel for BlindPositionModel {
    fn get_r(&self) -> &Matrix2<f64> {
        &self.r_matrix
    }

    fn predict_measurement(&self, _state: &StateVector) -> Vector2<f64> {
        Vector2::zeros()
    }

    fn calculate_jacobian(&self, _state: &StateVector) -> Matrix2x3<f64> {
        Matrix2x3::zeros()
    }
}
