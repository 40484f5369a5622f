// truepath_sim/src/lib.rs

//! Synthetic scenarios for `truepath_core`: ground-truth motion, noisy sensor
//! streams with GNSS outages, and scoring of the fused estimate against a
//! dead-reckoning baseline.

// This prelude is for convenience for other files WITHIN the truepath_sim crate.
pub mod prelude;

pub mod cli;
pub mod error;
pub mod simulation;
