// truepath_sim/src/simulation/config/mod.rs

//! This module handles loading and validating scenario configuration from
//! built-in defaults, a TOML file and the environment.

pub mod structs;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;
use tracing::{info, warn};

use crate::error::SimError;
pub use structs::{ScenarioConfig, TimeWindow};

/// Prefix for environment overrides, e.g. `TRUEPATH_SIMULATION__SEED=7`.
pub const ENV_PREFIX: &str = "TRUEPATH_";

/// Builds the layered configuration: defaults, then the scenario file, then the environment.
pub fn scenario_figment(scenario_path: &Path) -> Figment {
    Figment::from(Serialized::defaults(ScenarioConfig::default()))
        .merge(Toml::file(scenario_path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Loads a scenario and rejects it early if the estimator would refuse it.
pub fn load_scenario(scenario_path: &Path) -> Result<ScenarioConfig, SimError> {
    if scenario_path.exists() {
        info!("Loading scenario from: {}", scenario_path.display());
    } else {
        warn!(
            "Scenario file '{}' not found, using built-in defaults",
            scenario_path.display()
        );
    }

    let config: ScenarioConfig = scenario_figment(scenario_path).extract()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::structs::MAX_SEED;
    use figment::Jail;
    use truepath_core::error::ConfigError;

    #[test]
    fn test_missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let config = load_scenario(Path::new("does_not_exist.toml")).unwrap();
            assert_eq!(config, ScenarioConfig::default());
            assert_eq!(config.simulation.horizon(), 600);
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env_layers() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "scenario.toml",
                r#"
                [simulation]
                seed = 11
                dt = 0.05
                duration_seconds = 10.0

                [sensors.gps]
                noise_stddev = 3.0

                [sensors.gps.dropout]
                enabled = false
                start = 2.0
                end = 4.0
                "#,
            )?;
            jail.set_env("TRUEPATH_MOTION__SPEED", "5.0");

            let config = load_scenario(Path::new("scenario.toml")).unwrap();
            assert_eq!(config.simulation.seed, Some(11));
            assert_eq!(config.simulation.horizon(), 200);
            assert_eq!(config.sensors.gps.noise_stddev, 3.0);
            assert_eq!(config.outage_window(), None);
            assert_eq!(config.motion.speed, 5.0);
            // Untouched sections keep their defaults.
            assert_eq!(config.sensors.imu.bias_drift_final, 0.02);
            Ok(())
        });
    }

    #[test]
    fn test_rejects_invalid_estimator_settings() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "bad.toml",
                r#"
                [estimator]
                process_noise = [0.1, 0.1, 0.01]
                measurement_noise = [0.0, 2.0]
                initial_covariance_scale = 1.0
                "#,
            )?;
            let err = load_scenario(Path::new("bad.toml")).unwrap_err();
            assert!(matches!(err, SimError::Config(_)), "{err}");
            Ok(())
        });
    }

    #[test]
    fn test_rejects_horizon_too_long_to_allocate() {
        Jail::expect_with(|jail| {
            jail.create_file("forever.toml", "[simulation]\nduration_seconds = 1e30\n")?;
            let err = load_scenario(Path::new("forever.toml")).unwrap_err();
            assert!(
                matches!(err, SimError::Config(ConfigError::HorizonTooLarge { .. })),
                "{err}"
            );
            Ok(())
        });
    }

    #[test]
    fn test_rejects_env_seed_beyond_toml_range() {
        Jail::expect_with(|jail| {
            jail.set_env("TRUEPATH_SIMULATION__SEED", "18446744073709551615");
            let err = load_scenario(Path::new("missing.toml")).unwrap_err();
            assert!(
                matches!(err, SimError::SeedOutOfRange { max: MAX_SEED, .. }),
                "{err}"
            );

            jail.set_env("TRUEPATH_SIMULATION__SEED", "9223372036854775807");
            let config = load_scenario(Path::new("missing.toml")).unwrap();
            assert_eq!(config.simulation.seed, Some(MAX_SEED));
            Ok(())
        });
    }

    #[test]
    fn test_rejects_unknown_fields() {
        Jail::expect_with(|jail| {
            jail.create_file("typo.toml", "[simulation]\nduraton_seconds = 5.0\n")?;
            let err = load_scenario(Path::new("typo.toml")).unwrap_err();
            assert!(matches!(err, SimError::Scenario(_)), "{err}");
            Ok(())
        });
    }
}
