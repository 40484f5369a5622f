// truepath_sim/src/simulation/runner.rs

use tracing::{debug, info, warn};
use truepath_core::prelude::*;

use crate::error::SimError;
use crate::simulation::config::structs::ScenarioConfig;
use crate::simulation::core::ground_truth::GroundTruth;
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::evaluation::EvaluationReport;
use crate::simulation::sensors::SensorSuite;

/// Everything produced by one scenario run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub truth: GroundTruth,
    pub samples: Vec<SensorSample>,
    pub fusion: Trajectory,
    pub dead_reckoning: Trajectory,
    /// Covariance of the fused estimate after the last step.
    pub final_covariance: Covariance,
    pub report: EvaluationReport,
}

/// Generates truth and sensor data, runs the EKF and the dead-reckoning
/// baseline over the same samples, and scores both.
pub fn run_scenario(
    config: &ScenarioConfig,
    seed: u64,
    rng: &mut SimulationRng,
) -> Result<RunOutcome, SimError> {
    let estimator_config = config.estimator_config();
    // Fail fast, before any data is generated.
    let mut ekf = ExtendedKalmanFilter::new(estimator_config.clone())?;
    let mut dead_reckoning = DeadReckoning::new(&estimator_config)?;

    let horizon = estimator_config.horizon;
    let truth = GroundTruth::generate(&config.motion, estimator_config.dt, horizon);
    let sensors = SensorSuite::new(&config.sensors, horizon)?;
    let samples = sensors.sample(&truth, rng);

    let fixes = samples.iter().filter(|s| s.position_fix.is_some()).count();
    info!(
        steps = horizon,
        dt = estimator_config.dt,
        fixes,
        "Running estimators"
    );

    run_with_correction_fallback(&mut ekf, &samples)?;
    dead_reckoning.run(&samples)?;

    let outage = config.outage_window();
    let report = EvaluationReport::evaluate(
        seed,
        &truth,
        ekf.trajectory(),
        dead_reckoning.trajectory(),
        outage.as_ref(),
    );
    debug!(trace_p = ekf.covariance().trace(), "Final fused covariance");

    Ok(RunOutcome {
        final_covariance: *ekf.covariance(),
        fusion: ekf.trajectory().clone(),
        dead_reckoning: dead_reckoning.trajectory().clone(),
        truth,
        samples,
        report,
    })
}

/// Feeds every sample to the EKF. A step whose correction fails numerically is
/// re-run on prediction alone instead of aborting the whole run.
pub fn run_with_correction_fallback(
    ekf: &mut ExtendedKalmanFilter,
    samples: &[SensorSample],
) -> Result<(), EstimatorError> {
    for sample in samples {
        match ekf.process(sample) {
            Ok(_) => {}
            Err(EstimatorError::Correction { step, source }) => {
                warn!(step, error = %source, "Skipping position correction for this step");
                ekf.process(&sample.without_fix())?;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::structs::{Simulation, TimeWindow};
    use truepath_core::testing::BlindPositionModel;

    fn short_scenario() -> ScenarioConfig {
        ScenarioConfig {
            simulation: Simulation {
                seed: Some(3),
                dt: 0.1,
                duration_seconds: 10.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_outcome_lengths_match_horizon() {
        let config = short_scenario();
        let outcome = run_scenario(&config, 3, &mut SimulationRng::from_seed(3)).unwrap();
        assert_eq!(outcome.truth.len(), 100);
        assert_eq!(outcome.samples.len(), 100);
        assert!(outcome.fusion.is_complete());
        assert!(outcome.dead_reckoning.is_complete());
        assert_eq!(outcome.report.seed, 3);
        assert_eq!(
            config.outage_window(),
            Some(TimeWindow::new(20.0, 40.0))
        );
        // The outage lies beyond this short run.
        assert_eq!(outcome.report.fusion.peak_outage_error, None);
    }

    #[test]
    fn test_invalid_estimator_config_fails_before_running() {
        let mut config = short_scenario();
        config.simulation.dt = 0.0;
        let err = run_scenario(&config, 3, &mut SimulationRng::from_seed(3)).unwrap_err();
        assert!(matches!(err, SimError::Config(_)), "{err}");
    }

    #[test]
    fn test_failed_corrections_fall_back_to_prediction() {
        let config = EstimatorConfig {
            horizon: 20,
            ..Default::default()
        };
        let mut ekf = ExtendedKalmanFilter::with_models(
            config.clone(),
            Box::new(UnicycleModel),
            Box::new(BlindPositionModel::new()),
        )
        .unwrap();
        let samples = vec![SensorSample::new(0.1, 2.0, Some(PositionFix::new(9.0, 9.0))); 20];
        run_with_correction_fallback(&mut ekf, &samples).unwrap();

        let mut dr = DeadReckoning::new(&config).unwrap();
        dr.run(&samples).unwrap();
        assert_eq!(ekf.trajectory(), dr.trajectory());
    }
}
