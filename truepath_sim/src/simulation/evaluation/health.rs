// truepath_sim/src/simulation/evaluation/health.rs

use serde::Serialize;
use std::fmt;

/// Each metre of fused RMSE costs this many points of the 100-point score.
const POINTS_PER_METRE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    High,
    Moderate,
    Degraded,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            HealthStatus::High => {
                "HIGH RELIABILITY: drift controlled, fast GNSS recovery, robust fusion"
            }
            HealthStatus::Moderate => "MODERATE RELIABILITY: increased sensitivity to noise",
            HealthStatus::Degraded => {
                "DEGRADED: high uncertainty, unsafe for autonomous operation"
            }
        };
        f.write_str(text)
    }
}

/// Localization stability summarized from the fused RMSE.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemHealth {
    /// 0 to 100, higher is better.
    pub score: f64,
    pub status: HealthStatus,
}

impl SystemHealth {
    pub fn from_rmse(fusion_rmse: f64) -> Self {
        let score = (100.0 - fusion_rmse * POINTS_PER_METRE).max(0.0);
        let status = if score > 80.0 {
            HealthStatus::High
        } else if score > 50.0 {
            HealthStatus::Moderate
        } else {
            HealthStatus::Degraded
        };
        Self { score, status }
    }
}
