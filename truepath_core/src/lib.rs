// truepath_core/src/lib.rs

//! Pose estimation for a ground vehicle from a gyroscope, a wheel-speed sensor
//! and an intermittent absolute position sensor.

pub mod config;
pub mod error;
pub mod estimation;
pub mod models;
pub mod prelude;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod types;
