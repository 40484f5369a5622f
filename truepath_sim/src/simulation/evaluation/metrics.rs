// truepath_sim/src/simulation/evaluation/metrics.rs

use truepath_core::types::Pose;

use crate::simulation::config::structs::TimeWindow;

/// Euclidean position error per step. Extra entries on either side are ignored.
pub fn position_errors(truth: &[Pose], estimate: &[Pose]) -> Vec<f64> {
    truth
        .iter()
        .zip(estimate)
        .map(|(t, e)| t.distance_to(e))
        .collect()
}

/// Root mean square of the errors; zero for an empty series.
pub fn rmse(errors: &[f64]) -> f64 {
    if errors.is_empty() {
        return 0.0;
    }
    (errors.iter().map(|e| e * e).sum::<f64>() / errors.len() as f64).sqrt()
}

/// Relative RMSE reduction of `candidate` over `baseline`, in percent.
pub fn improvement_percent(baseline_rmse: f64, candidate_rmse: f64) -> f64 {
    if baseline_rmse <= 0.0 {
        return 0.0;
    }
    (baseline_rmse - candidate_rmse) / baseline_rmse * 100.0
}

/// Largest error among the steps whose sample time falls inside `window`.
pub fn peak_in_window(errors: &[f64], times: &[f64], window: &TimeWindow) -> Option<f64> {
    errors
        .iter()
        .zip(times)
        .filter(|&(_, &t)| window.contains(t))
        .map(|(&e, _)| e)
        .reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rmse() {
        assert_eq!(rmse(&[]), 0.0);
        assert_abs_diff_eq!(rmse(&[3.0, 4.0]), (12.5f64).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_position_errors() {
        let truth = [Pose::new(0.0, 0.0, 0.0), Pose::new(1.0, 1.0, 0.0)];
        let estimate = [Pose::new(3.0, 4.0, 2.0), Pose::new(1.0, 1.0, -1.0)];
        assert_eq!(position_errors(&truth, &estimate), vec![5.0, 0.0]);
    }

    #[test]
    fn test_improvement() {
        assert_abs_diff_eq!(improvement_percent(10.0, 2.5), 75.0, epsilon = 1e-12);
        assert_eq!(improvement_percent(0.0, 1.0), 0.0);
        assert!(improvement_percent(1.0, 2.0) < 0.0);
    }

    #[test]
    fn test_peak_in_window() {
        let errors = [1.0, 9.0, 3.0, 7.0];
        let times = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(
            peak_in_window(&errors, &times, &TimeWindow::new(1.5, 3.5)),
            Some(7.0)
        );
        assert_eq!(
            peak_in_window(&errors, &times, &TimeWindow::new(5.0, 6.0)),
            None
        );
    }
}
