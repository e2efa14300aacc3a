use thiserror::Error;

/// Unified error taxonomy for the forecasting pipeline.
///
/// Parsing and windowing failures abort their stage and carry enough context
/// to message an end user. Numeric edge cases inside reporting paths
/// (evaluator, baseline) are handled locally with guarded values and never
/// reach this enum.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Raw text could not be turned into a usable price series at all.
    #[error("parse error: {0}")]
    Parse(String),

    /// Not enough valid points for the requested operation.
    #[error("insufficient data: need at least {needed} data points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A statistic that needs a long lookback (e.g. slow SMA) has no value yet.
    #[error("insufficient history: {0}")]
    InsufficientHistory(String),

    /// A component was asked to transform or predict before being fitted.
    #[error("not fitted: {0}")]
    NotFitted(&'static str),

    /// Prediction and actual matrices disagree in outer or inner length.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}
