// truepath_core/src/estimation/covariance.rs

use nalgebra::{Matrix3, SymmetricEigen};

use crate::types::Covariance;

/// Advances the covariance through the linearized process: `P' = F P Fᵀ + Q`.
///
/// `jacobian` must come from the same step's prediction, before any correction.
/// No re-symmetrization is applied.
pub fn propagate_covariance(
    covariance: &Covariance,
    jacobian: &Matrix3<f64>,
    process_noise_q: &Matrix3<f64>,
) -> Covariance {
    jacobian * covariance * jacobian.transpose() + process_noise_q
}

/// Checks that `p` is symmetric and positive semi-definite, both up to `tolerance`.
pub fn is_symmetric_psd(p: &Covariance, tolerance: f64) -> bool {
    if (p - p.transpose()).abs().max() > tolerance {
        return false;
    }
    let eigen = SymmetricEigen::new(*p);
    eigen.eigenvalues.iter().all(|&lambda| lambda >= -tolerance)
}
