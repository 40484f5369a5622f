// truepath_sim/src/simulation/mod.rs

pub mod config;
pub mod core;
pub mod evaluation;
pub mod runner;
pub mod sensors;
