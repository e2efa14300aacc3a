use serde::{Deserialize, Serialize};

/// Day-over-day simple returns derived from a [`PriceSeries`](crate::PriceSeries).
///
/// Always recomputed from the owning price series; never mutated in place.
/// Length is `prices.len() - 1` (empty for a series of fewer than two points).
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ReturnSeries {
    pub values: Vec<f64>,
}

impl ReturnSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
