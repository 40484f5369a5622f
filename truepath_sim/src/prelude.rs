// truepath_sim/src/prelude.rs

// Re-export the entire truepath_core prelude so you can easily access
// pure types like `Pose`, `SensorSample`, `StateEstimator`, etc.
pub use truepath_core::prelude::*;

// Re-export common simulation-specific types for easy access.
pub use crate::error::SimError;
pub use crate::simulation::config::structs::*;
pub use crate::simulation::config::{load_scenario, scenario_figment};
pub use crate::simulation::core::ground_truth::GroundTruth;
pub use crate::simulation::core::prng::SimulationRng;
pub use crate::simulation::evaluation::health::{HealthStatus, SystemHealth};
pub use crate::simulation::evaluation::{EstimatorStats, EvaluationReport};
pub use crate::simulation::runner::{run_scenario, RunOutcome};
pub use crate::simulation::sensors::SensorSuite;
