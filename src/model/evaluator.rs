use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Pooled forecast-error metrics for one predictor over one test set.
/// Derived per evaluation call; nothing here is cached or persisted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub rmse: f64,
    pub mse: f64,
    pub mae: f64,
    /// Percentage of scalar pairs whose signs agree, in `[0, 100]`.
    pub direction_accuracy: f64,
    /// Number of scalar pairs pooled into the metrics.
    pub sample_size: usize,
}

/// Forecast-error engine: pools every scalar prediction/actual pair across
/// all samples and horizon steps into one error population.
pub struct Evaluator;

impl Evaluator {
    /// Compare prediction rows against actual rows. Shapes must match
    /// exactly (same number of rows, same length per row), otherwise
    /// `ShapeMismatch`.
    ///
    /// Errors are pooled globally, not averaged per step and re-averaged,
    /// so every scalar pair carries equal weight regardless of row count.
    /// Direction matching counts zero as non-negative on both sides.
    pub fn evaluate(
        predictions: &[Vec<f64>],
        actuals: &[Vec<f64>],
    ) -> Result<BenchmarkResult, PipelineError> {
        if predictions.len() != actuals.len() {
            return Err(PipelineError::ShapeMismatch(format!(
                "{} prediction rows vs {} actual rows",
                predictions.len(),
                actuals.len()
            )));
        }

        let mut sum_squared = 0.0;
        let mut sum_absolute = 0.0;
        let mut matching_direction: usize = 0;
        let mut count: usize = 0;

        for (row, (predicted_row, actual_row)) in
            predictions.iter().zip(actuals.iter()).enumerate()
        {
            if predicted_row.len() != actual_row.len() {
                return Err(PipelineError::ShapeMismatch(format!(
                    "row {row}: {} predicted steps vs {} actual steps",
                    predicted_row.len(),
                    actual_row.len()
                )));
            }

            for (&predicted, &actual) in predicted_row.iter().zip(actual_row.iter()) {
                let error = actual - predicted;
                sum_squared += error * error;
                sum_absolute += error.abs();
                if (actual >= 0.0) == (predicted >= 0.0) {
                    matching_direction += 1;
                }
                count += 1;
            }
        }

        // Empty input is a reporting edge, not a crash: all-zero result.
        if count == 0 {
            return Ok(BenchmarkResult::default());
        }

        let mse = sum_squared / count as f64;
        Ok(BenchmarkResult {
            rmse: mse.sqrt(),
            mse,
            mae: sum_absolute / count as f64,
            direction_accuracy: matching_direction as f64 / count as f64 * 100.0,
            sample_size: count,
        })
    }

    /// RMSE improvement of `candidate` over `baseline`, as a percentage.
    /// Positive means the candidate beats the baseline. Zero (not a crash,
    /// not infinity) when the baseline RMSE is zero.
    pub fn compare(baseline: &BenchmarkResult, candidate: &BenchmarkResult) -> f64 {
        if baseline.rmse == 0.0 {
            return 0.0;
        }
        (baseline.rmse - candidate.rmse) / baseline.rmse * 100.0
    }
}
