use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::utils::min_max;

/// Fitted min-max bounds of one return series.
///
/// Owns the invertible affine map to `[0, 1]`. A degenerate series
/// (`max == min`) substitutes a denominator of 1, leaving values unshifted
/// rather than dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParams {
    pub min: f64,
    pub max: f64,
}

impl NormalizationParams {
    #[inline]
    fn range(&self) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 { 1.0 } else { range }
    }

    #[inline]
    pub fn apply(&self, r: f64) -> f64 {
        (r - self.min) / self.range()
    }

    #[inline]
    pub fn invert(&self, n: f64) -> f64 {
        n * self.range() + self.min
    }
}

/// Min-max scaler with an explicit fitted/unfitted lifecycle.
///
/// Fit once per load; any transform before that fails with `NotFitted`.
/// A reload resets the scaler along with the rest of the derived state.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    params: Option<NormalizationParams>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(&mut self, values: &[f64]) -> Result<NormalizationParams, PipelineError> {
        if values.is_empty() {
            return Err(PipelineError::InsufficientData { needed: 1, got: 0 });
        }

        let (min, max) = min_max(values);
        let params = NormalizationParams { min, max };
        self.params = Some(params);
        Ok(params)
    }

    pub fn params(&self) -> Result<NormalizationParams, PipelineError> {
        self.params.ok_or(PipelineError::NotFitted("normalizer"))
    }

    pub fn apply(&self, r: f64) -> Result<f64, PipelineError> {
        Ok(self.params()?.apply(r))
    }

    pub fn invert(&self, n: f64) -> Result<f64, PipelineError> {
        Ok(self.params()?.invert(n))
    }

    /// Normalize a whole series with the fitted bounds.
    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>, PipelineError> {
        let params = self.params()?;
        Ok(values.iter().map(|&r| params.apply(r)).collect())
    }

    pub fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    pub fn reset(&mut self) {
        self.params = None;
    }
}
