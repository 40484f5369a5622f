// truepath_sim/src/simulation/config/structs.rs

use serde::{Deserialize, Serialize};
use truepath_core::config::{EstimatorConfig, NoiseConfig};

use crate::error::SimError;

/// Largest accepted seed. Reports are TOML, whose integers are signed 64-bit.
pub const MAX_SEED: u64 = i64::MAX as u64;

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// # ScenarioConfig
/// Everything needed for one synthetic run. This struct is the root of the
/// data parsed from a `scenario.toml` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: Simulation,

    #[serde(default)]
    pub motion: MotionProfile,

    #[serde(default)]
    pub sensors: SensorsConfig,

    #[serde(default)]
    pub estimator: EstimatorSection,
}

impl ScenarioConfig {
    /// The core estimator configuration implied by this scenario.
    pub fn estimator_config(&self) -> EstimatorConfig {
        EstimatorConfig {
            dt: self.simulation.dt,
            horizon: self.simulation.horizon(),
            noise: NoiseConfig {
                process: self.estimator.process_noise,
                measurement: self.estimator.measurement_noise,
            },
            initial_covariance_scale: self.estimator.initial_covariance_scale,
        }
    }

    /// Rejects settings that would only fail later in the run or when the
    /// report is written.
    pub fn validate(&self) -> Result<(), SimError> {
        if let Some(seed) = self.simulation.seed {
            if seed > MAX_SEED {
                return Err(SimError::SeedOutOfRange {
                    seed,
                    max: MAX_SEED,
                });
            }
        }
        self.estimator_config().validate()?;
        Ok(())
    }

    /// The GPS outage window, if dropout is enabled.
    pub fn outage_window(&self) -> Option<TimeWindow> {
        let dropout = &self.sensors.gps.dropout;
        dropout.enabled.then(|| dropout.window())
    }
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in your scenario.toml file.
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Fixed step shared by every sensor, in seconds.
    pub dt: f64,
    /// Duration of the simulation in seconds.
    pub duration_seconds: f64,
}

impl Simulation {
    /// Number of steps in the run, `duration / dt` rounded to the nearest step.
    pub fn horizon(&self) -> usize {
        // Negative or NaN ratios saturate to zero and are rejected by the estimator config.
        (self.duration_seconds / self.dt).round() as usize
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: None,
            dt: 0.1,
            duration_seconds: 60.0,
        }
    }
}

/// An open time interval `start < t < end`, in seconds since the start of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: f64) -> bool {
        self.start < t && t < self.end
    }
}

/// The true vehicle motion: constant speed, straight, one constant-rate turn, straight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotionProfile {
    /// m/s
    pub speed: f64,
    /// rad/s, applied inside the turn window.
    pub turn_rate: f64,
    pub turn_start: f64,
    pub turn_end: f64,
}

impl MotionProfile {
    pub fn turn_window(&self) -> TimeWindow {
        TimeWindow::new(self.turn_start, self.turn_end)
    }

    pub fn turn_rate_at(&self, t: f64) -> f64 {
        if self.turn_window().contains(t) {
            self.turn_rate
        } else {
            0.0
        }
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            speed: 2.0,
            turn_rate: 0.1,
            turn_start: 20.0,
            turn_end: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SensorsConfig {
    #[serde(default)]
    pub gps: GpsConfig,
    #[serde(default)]
    pub imu: ImuConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GpsConfig {
    /// Per-axis standard deviation in metres.
    pub noise_stddev: f64,
    #[serde(default)]
    pub dropout: DropoutConfig,
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            noise_stddev: 1.5,
            dropout: DropoutConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DropoutConfig {
    pub enabled: bool,
    /// Outage begins after this time (s).
    pub start: f64,
    /// Fixes return at this time (s).
    pub end: f64,
}

impl DropoutConfig {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }
}

impl Default for DropoutConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start: 20.0,
            end: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImuConfig {
    /// Gyroscope white noise, rad/s.
    pub noise_stddev: f64,
    /// Gyroscope bias at the last step; it ramps linearly from zero.
    pub bias_drift_final: f64,
}

impl Default for ImuConfig {
    fn default() -> Self {
        Self {
            noise_stddev: 0.01,
            bias_drift_final: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WheelConfig {
    /// Wheel speed noise, m/s.
    pub noise_stddev: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self { noise_stddev: 0.2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimatorSection {
    /// Diagonal of Q, `[x, y, theta]`.
    pub process_noise: [f64; 3],
    /// Diagonal of R, `[x, y]`.
    pub measurement_noise: [f64; 2],
    pub initial_covariance_scale: f64,
}

impl Default for EstimatorSection {
    fn default() -> Self {
        let core = EstimatorConfig::default();
        Self {
            process_noise: core.noise.process,
            measurement_noise: core.noise.measurement,
            initial_covariance_scale: core.initial_covariance_scale,
        }
    }
}
