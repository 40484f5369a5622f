// truepath_sim/src/simulation/evaluation/mod.rs

//! Scores estimator output against ground truth. Nothing here feeds back into
//! the estimators.

pub mod health;
pub mod metrics;

use serde::Serialize;
use std::path::Path;
use truepath_core::types::Trajectory;

use crate::error::SimError;
use crate::simulation::config::structs::TimeWindow;
use crate::simulation::core::ground_truth::GroundTruth;
use health::SystemHealth;
use metrics::{improvement_percent, peak_in_window, position_errors, rmse};

/// Error statistics of one estimator over a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatorStats {
    pub rmse: f64,
    pub final_error: f64,
    /// Worst error while position fixes were unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_outage_error: Option<f64>,
    #[serde(skip)]
    pub errors: Vec<f64>,
}

impl EstimatorStats {
    pub fn compute(
        truth: &GroundTruth,
        estimate: &Trajectory,
        outage: Option<&TimeWindow>,
    ) -> Self {
        let errors = position_errors(&truth.poses, estimate.as_slice());
        Self {
            rmse: rmse(&errors),
            final_error: errors.last().copied().unwrap_or(0.0),
            peak_outage_error: outage.and_then(|w| peak_in_window(&errors, &truth.times, w)),
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub seed: u64,
    /// RMSE reduction of fusion over dead reckoning, in percent.
    pub improvement_percent: f64,
    pub dead_reckoning: EstimatorStats,
    pub fusion: EstimatorStats,
    pub health: SystemHealth,
}

impl EvaluationReport {
    pub fn evaluate(
        seed: u64,
        truth: &GroundTruth,
        fusion: &Trajectory,
        dead_reckoning: &Trajectory,
        outage: Option<&TimeWindow>,
    ) -> Self {
        let dead_reckoning = EstimatorStats::compute(truth, dead_reckoning, outage);
        let fusion = EstimatorStats::compute(truth, fusion, outage);
        Self {
            seed,
            improvement_percent: improvement_percent(dead_reckoning.rmse, fusion.rmse),
            health: SystemHealth::from_rmse(fusion.rmse),
            dead_reckoning,
            fusion,
        }
    }

    pub fn to_toml(&self) -> Result<String, SimError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn write_toml(&self, path: &Path) -> Result<(), SimError> {
        std::fs::write(path, self.to_toml()?).map_err(|source| SimError::Report {
            path: path.to_path_buf(),
            source,
        })
    }
}
