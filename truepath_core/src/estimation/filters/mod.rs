// truepath_core/src/estimation/filters/mod.rs

pub mod dead_reckoning;
pub mod ekf;
