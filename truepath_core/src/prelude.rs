// truepath_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::estimation::{FilterPhase, StateEstimator};
pub use crate::models::measurement::MeasurementModel;
pub use crate::models::motion::{MotionModel, Prediction};

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::config::{EstimatorConfig, NoiseConfig};
pub use crate::error::{ConfigError, CorrectionError, EstimatorError};
pub use crate::types::{
    Control, Covariance, GaussianPose, Pose, PositionFix, SensorSample, StateVector, Trajectory,
};

// --- Estimation Algorithms ---
pub use crate::estimation::ekf::{ekf_predict, ekf_update};
pub use crate::estimation::filters::dead_reckoning::DeadReckoning;
pub use crate::estimation::filters::ekf::ExtendedKalmanFilter;

// --- Concrete Model Implementations (Export common ones for convenience) ---
pub use crate::models::measurement::gps::GpsPositionModel;
pub use crate::models::motion::UnicycleModel;
