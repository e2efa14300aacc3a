//! Domain value types shared across the pipeline.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Fraction of the windowed dataset reserved as the chronological test
/// suffix. Clamped to `[0, 1]` at construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitFraction(f64);

impl SplitFraction {
    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 {
            0.0
        } else if val > 1.0 {
            1.0
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for SplitFraction {
    fn default() -> Self {
        crate::config::constants::windowing::TEST_SPLIT
    }
}

impl std::fmt::Display for SplitFraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

/// Symmetric bound applied to every baseline forecast. Negative inputs are
/// folded to zero so the clamp interval is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ReturnClamp(f64);

impl ReturnClamp {
    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 { 0.0 } else { val };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Clamps a forecasted return into `[-bound, +bound]`.
    #[inline]
    pub fn apply(self, r: f64) -> f64 {
        r.clamp(-self.0, self.0)
    }
}

impl std::fmt::Display for ReturnClamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "±{:.2}%", self.0 * 100.0)
    }
}

/// SMA-crossover verdict for the loaded series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Trend {
    Bullish,
    Bearish,
}
