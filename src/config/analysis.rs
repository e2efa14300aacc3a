//! Runtime-overridable configuration for the pipeline stages.

use serde::{Deserialize, Serialize};

use crate::config::types::{ReturnClamp, SplitFraction};

/// How the normalized return series is sliced into supervised samples.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Length of each model input window, in trading days.
    pub window_size: usize,
    /// Number of future steps each sample predicts.
    pub horizon: usize,
    /// Trailing fraction of samples held out as the test set.
    pub test_split: SplitFraction,
}

impl Default for WindowConfig {
    fn default() -> Self {
        crate::config::constants::windowing::DEFAULT
    }
}

/// Lookbacks used when deriving the insights snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Fast SMA period for the trend crossover.
    pub sma_fast: usize,
    /// Slow SMA period for the trend crossover. The trend verdict is only
    /// available once the series covers this many points.
    pub sma_slow: usize,
    /// Rolling volatility window, in trading days.
    pub rolling_vol_window: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        crate::config::constants::insights::DEFAULT
    }
}

/// Guards applied when fitting and sampling the random-walk baseline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Returns with absolute value at or above this are treated as garbage
    /// and excluded from the fit.
    pub outlier_bound: f64,
    /// Floor applied to the fitted variance before taking the square root.
    pub variance_floor: f64,
    /// Bound applied to every emitted forecast.
    pub clamp: ReturnClamp,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        crate::config::constants::baseline::DEFAULT
    }
}
