use rand::Rng;

use crate::config::{BaselineConfig, constants};
use crate::error::PipelineError;

/// Random-walk forecaster: the statistical floor any sequence model has to
/// beat before its benchmark numbers mean anything.
///
/// Fit captures the mean and standard deviation of the historical returns.
/// Each forecast step is independent (no autoregressive feedback): either a
/// uniform resample from the supplied recent history, or a draw from an
/// approximate Normal(mean, std) when no history is given.
#[derive(Debug, Clone)]
pub struct RandomWalkBaseline {
    config: BaselineConfig,
    mean_return: f64,
    std_return: f64,
    is_trained: bool,
}

impl Default for RandomWalkBaseline {
    fn default() -> Self {
        Self {
            config: BaselineConfig::default(),
            mean_return: 0.0,
            std_return: constants::baseline::UNFITTED_STD,
            is_trained: false,
        }
    }
}

impl RandomWalkBaseline {
    pub fn with_config(config: BaselineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Fit mean/std over the returns, excluding non-finite values and
    /// anything at or beyond the outlier bound. The variance is floored
    /// before the square root so the distribution never collapses to a
    /// single point.
    pub fn fit(&mut self, returns: &[f64]) {
        let valid: Vec<f64> = returns
            .iter()
            .copied()
            .filter(|r| r.is_finite() && r.abs() < self.config.outlier_bound)
            .collect();

        if !valid.is_empty() {
            let (mean, std) = crate::utils::mean_and_stddev(&valid);
            self.mean_return = mean;
            self.std_return = (std * std).max(self.config.variance_floor).sqrt();
        }

        self.is_trained = true;
        log::info!(
            "[baseline] fitted on {} of {} returns: mean={:.6}, std={:.6}",
            valid.len(),
            returns.len(),
            self.mean_return,
            self.std_return,
        );
    }

    /// Forecast `num_predictions` independent return steps, each clamped to
    /// the configured bound.
    pub fn predict(
        &self,
        recent_returns: &[f64],
        num_predictions: usize,
    ) -> Result<Vec<f64>, PipelineError> {
        if !self.is_trained {
            return Err(PipelineError::NotFitted("random-walk baseline"));
        }

        let mut rng = rand::thread_rng();
        let predictions = (0..num_predictions)
            .map(|_| {
                let raw = if recent_returns.is_empty() {
                    self.draw_normal_approx(&mut rng)
                } else {
                    recent_returns[rng.gen_range(0..recent_returns.len())]
                };
                self.config.clamp.apply(raw)
            })
            .collect();

        Ok(predictions)
    }

    /// Normal(mean, std) draw via the 12-uniform-sum approximation: the sum
    /// of 12 U(0,1) draws minus 6 approximates a standard normal.
    fn draw_normal_approx(&self, rng: &mut impl Rng) -> f64 {
        let sum: f64 = (0..12).map(|_| rng.r#gen::<f64>()).sum();
        self.mean_return + self.std_return * (sum - 6.0)
    }

    pub fn is_trained(&self) -> bool {
        self.is_trained
    }

    pub fn mean_return(&self) -> f64 {
        self.mean_return
    }

    pub fn std_return(&self) -> f64 {
        self.std_return
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_filters_garbage_and_floors_variance() {
        let mut baseline = RandomWalkBaseline::default();
        baseline.fit(&[0.01, -0.01, f64::NAN, f64::INFINITY, 3.0, -2.5]);

        assert!(baseline.is_trained());
        assert!((baseline.mean_return() - 0.0).abs() < 1e-12);
        // Variance floor keeps std at or above sqrt(1e-6).
        assert!(baseline.std_return() >= 1e-3);
    }

    #[test]
    fn constant_returns_hit_the_variance_floor() {
        let mut baseline = RandomWalkBaseline::default();
        baseline.fit(&[0.002; 50]);
        assert!((baseline.std_return() - 1e-3).abs() < 1e-12);
    }

    #[test]
    fn no_history_draws_stay_clamped() {
        let mut baseline = RandomWalkBaseline::default();
        baseline.fit(&[0.001; 30]);

        let predictions = baseline.predict(&[], 5).unwrap();
        assert_eq!(predictions.len(), 5);
        assert!(predictions.iter().all(|p| (-0.05..=0.05).contains(p)));
    }

    #[test]
    fn history_resamples_come_from_the_history() {
        let mut baseline = RandomWalkBaseline::default();
        baseline.fit(&[0.01, 0.02]);

        let history = [0.011, -0.007, 0.004];
        let predictions = baseline.predict(&history, 50).unwrap();
        assert!(
            predictions
                .iter()
                .all(|p| history.iter().any(|h| (h - p).abs() < 1e-15))
        );
    }

    #[test]
    fn large_resampled_values_are_clamped() {
        let mut baseline = RandomWalkBaseline::default();
        baseline.fit(&[0.01]);

        let predictions = baseline.predict(&[0.3, -0.4], 20).unwrap();
        assert!(predictions.iter().all(|p| p.abs() <= 0.05 + 1e-15));
    }

    #[test]
    fn unfitted_predict_is_rejected() {
        let baseline = RandomWalkBaseline::default();
        assert!(matches!(
            baseline.predict(&[0.01], 5),
            Err(PipelineError::NotFitted(_))
        ));
    }
}
