// truepath_sim/src/simulation/core/mod.rs

pub mod ground_truth;
pub mod prng;
