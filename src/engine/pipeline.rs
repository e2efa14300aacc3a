//! The forecasting pipeline context.
//!
//! One [`ForecastPipeline`] owns every piece of derived state for one load
//! cycle: price series, returns, insights snapshot, normalization bounds,
//! windowed dataset and the fitted baseline. Stages run strictly in order
//! (load, prepare, fit baseline, train/benchmark) and a reload discards the
//! whole derived set before anything is recomputed, so no stage can ever see
//! a mix of old and new data.

use anyhow::{Context, Result};

use crate::analysis::{Insights, compute_insights, compute_returns};
use crate::config::{BaselineConfig, InsightConfig, WindowConfig};
use crate::data::{RawSeriesProvider, SeriesParser};
use crate::domain::{PriceSeries, ReturnSeries};
use crate::error::PipelineError;
use crate::model::{
    BenchmarkResult, EpochCallback, Evaluator, NormalizationParams, Normalizer,
    RandomWalkBaseline, SequencePredictor, WindowedDataset, build_windows,
};
use crate::trace_time;

pub struct ForecastPipeline {
    parser: SeriesParser,
    window_config: WindowConfig,
    insight_config: InsightConfig,
    baseline_config: BaselineConfig,

    // Derived state, recreated wholesale on every load.
    prices: Option<PriceSeries>,
    returns: Option<ReturnSeries>,
    insights: Option<Insights>,
    normalizer: Normalizer,
    normalized: Option<Vec<f64>>,
    dataset: Option<WindowedDataset>,
    baseline: RandomWalkBaseline,
}

impl Default for ForecastPipeline {
    fn default() -> Self {
        Self {
            parser: SeriesParser::default(),
            window_config: WindowConfig::default(),
            insight_config: InsightConfig::default(),
            baseline_config: BaselineConfig::default(),
            prices: None,
            returns: None,
            insights: None,
            normalizer: Normalizer::new(),
            normalized: None,
            dataset: None,
            baseline: RandomWalkBaseline::default(),
        }
    }
}

impl ForecastPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window_config(mut self, config: WindowConfig) -> Self {
        self.window_config = config;
        self
    }

    pub fn with_insight_config(mut self, config: InsightConfig) -> Self {
        self.insight_config = config;
        self
    }

    pub fn with_baseline_config(mut self, config: BaselineConfig) -> Self {
        self.baseline_config = config;
        self.baseline = RandomWalkBaseline::with_config(config);
        self
    }

    /// Fetch raw text from the provider and load it. The one async
    /// suspension on the data path.
    pub async fn load(&mut self, provider: &dyn RawSeriesProvider) -> Result<&Insights> {
        let raw = provider
            .fetch_raw()
            .await
            .context("failed to fetch raw series text")?;
        Ok(self.load_text(&raw)?)
    }

    /// Parse raw text and derive returns and the insights snapshot.
    /// Discards all previously derived state first.
    pub fn load_text(&mut self, raw: &str) -> Result<&Insights, PipelineError> {
        self.invalidate();

        let prices = trace_time!("parse series", 2_000, { self.parser.parse(raw) })?;
        let returns = compute_returns(&prices);
        let insights = compute_insights(&prices, &returns, &self.insight_config)?;

        log::info!(
            "[pipeline] loaded {} days, total return {:+.2}%, trend {}",
            prices.len(),
            insights.total_return * 100.0,
            insights
                .trend
                .map_or_else(|| "n/a".to_string(), |t| t.to_string()),
        );

        self.prices = Some(prices);
        self.returns = Some(returns);
        self.insights = Some(insights);
        Ok(self.insights.as_ref().expect("insights assigned above"))
    }

    /// Fit the normalizer on the loaded returns and build the windowed
    /// train/test dataset.
    pub fn prepare(&mut self) -> Result<&WindowedDataset, PipelineError> {
        let returns = self
            .returns
            .as_ref()
            .ok_or(PipelineError::NotFitted("price series (call load first)"))?;

        self.normalizer.fit(returns.as_slice())?;
        let normalized = self.normalizer.transform(returns.as_slice())?;
        let dataset = trace_time!("window build", 5_000, {
            build_windows(&normalized, &self.window_config)
        })?;

        self.normalized = Some(normalized);
        self.dataset = Some(dataset);
        Ok(self.dataset.as_ref().expect("dataset assigned above"))
    }

    /// Fit the random-walk baseline on the raw (unnormalized) returns.
    pub fn fit_baseline(&mut self) -> Result<(), PipelineError> {
        let returns = self
            .returns
            .as_ref()
            .ok_or(PipelineError::NotFitted("price series (call load first)"))?;
        self.baseline.fit(returns.as_slice());
        Ok(())
    }

    /// Train the external sequence model on the chronological training
    /// prefix. Progress surfaces through `on_epoch_end` once per epoch.
    pub async fn train_model(
        &self,
        model: &mut dyn SequencePredictor,
        epochs: usize,
        on_epoch_end: EpochCallback<'_>,
    ) -> Result<()> {
        let dataset = self
            .dataset
            .as_ref()
            .ok_or(PipelineError::NotFitted("windowed dataset (call prepare first)"))?;

        log::info!(
            "[pipeline] training sequence model: {} samples, {} epochs",
            dataset.train.len(),
            epochs,
        );
        model
            .fit(&dataset.train, epochs, on_epoch_end)
            .await
            .context("sequence model training failed")
    }

    /// Benchmark the external model on the held-out test suffix.
    ///
    /// Forecasts and targets are both mapped back to return space before
    /// scoring, so the numbers are comparable with the baseline's.
    pub async fn benchmark_model(&self, model: &dyn SequencePredictor) -> Result<BenchmarkResult> {
        let dataset = self
            .dataset
            .as_ref()
            .ok_or(PipelineError::NotFitted("windowed dataset (call prepare first)"))?;
        let params = self.normalizer.params()?;

        let mut predictions = Vec::with_capacity(dataset.test.len());
        let mut actuals = Vec::with_capacity(dataset.test.len());
        for sample in &dataset.test {
            let forecast = model
                .predict(&sample.input)
                .await
                .context("sequence model prediction failed")?;
            predictions.push(denormalize_row(&forecast, params));
            actuals.push(denormalize_row(&sample.target, params));
        }

        let result = Evaluator::evaluate(&predictions, &actuals)?;
        log::info!(
            "[pipeline] model benchmark: rmse={:.6} mae={:.6} direction={:.1}% ({} pairs)",
            result.rmse,
            result.mae,
            result.direction_accuracy,
            result.sample_size,
        );
        Ok(result)
    }

    /// Benchmark the fitted baseline on the same held-out test suffix.
    ///
    /// The reported numbers always come from evaluating the baseline's
    /// actual forecasts; there is no substitute figure on any path.
    pub fn benchmark_baseline(&self) -> Result<BenchmarkResult, PipelineError> {
        let dataset = self
            .dataset
            .as_ref()
            .ok_or(PipelineError::NotFitted("windowed dataset (call prepare first)"))?;
        let params = self.normalizer.params()?;

        let mut predictions = Vec::with_capacity(dataset.test.len());
        let mut actuals = Vec::with_capacity(dataset.test.len());
        for sample in &dataset.test {
            let recent = denormalize_row(&sample.input, params);
            predictions.push(self.baseline.predict(&recent, dataset.horizon)?);
            actuals.push(denormalize_row(&sample.target, params));
        }

        let result = Evaluator::evaluate(&predictions, &actuals)?;
        log::info!(
            "[pipeline] baseline benchmark: rmse={:.6} mae={:.6} direction={:.1}% ({} pairs)",
            result.rmse,
            result.mae,
            result.direction_accuracy,
            result.sample_size,
        );
        Ok(result)
    }

    /// The most recent input window, ready to hand to a predictor for a
    /// live forecast.
    pub fn latest_window(&self) -> Result<Vec<f64>, PipelineError> {
        let normalized = self
            .normalized
            .as_ref()
            .ok_or(PipelineError::NotFitted("windowed dataset (call prepare first)"))?;
        let w = self.window_config.window_size;
        if normalized.len() < w {
            return Err(PipelineError::InsufficientData {
                needed: w,
                got: normalized.len(),
            });
        }
        Ok(normalized[normalized.len() - w..].to_vec())
    }

    /// Convert a normalized return forecast into a price path by compounding
    /// from the last observed price: `p[t+1] = p[t] * (1 + r)`.
    pub fn forecast_prices(&self, normalized_forecast: &[f64]) -> Result<Vec<f64>, PipelineError> {
        let prices = self
            .prices
            .as_ref()
            .ok_or(PipelineError::NotFitted("price series (call load first)"))?;
        let params = self.normalizer.params()?;
        let mut level = prices
            .last_price()
            .ok_or(PipelineError::InsufficientData { needed: 1, got: 0 })?;

        let mut path = Vec::with_capacity(normalized_forecast.len());
        for &n in normalized_forecast {
            level *= 1.0 + params.invert(n);
            path.push(level);
        }
        Ok(path)
    }

    /// Drop every piece of derived state. Called automatically at the start
    /// of each load; also available to hosts that want to free the buffers
    /// early.
    pub fn invalidate(&mut self) {
        self.prices = None;
        self.returns = None;
        self.insights = None;
        self.normalized = None;
        self.dataset = None;
        self.normalizer.reset();
        self.baseline = RandomWalkBaseline::with_config(self.baseline_config);
        log::debug!("[pipeline] derived state invalidated");
    }

    // ─── Read access to the derived state ─────────────────────────────────

    pub fn prices(&self) -> Option<&PriceSeries> {
        self.prices.as_ref()
    }

    pub fn returns(&self) -> Option<&ReturnSeries> {
        self.returns.as_ref()
    }

    pub fn insights(&self) -> Option<&Insights> {
        self.insights.as_ref()
    }

    pub fn dataset(&self) -> Option<&WindowedDataset> {
        self.dataset.as_ref()
    }

    pub fn baseline(&self) -> &RandomWalkBaseline {
        &self.baseline
    }

    pub fn normalization_params(&self) -> Result<NormalizationParams, PipelineError> {
        self.normalizer.params()
    }
}

fn denormalize_row(row: &[f64], params: NormalizationParams) -> Vec<f64> {
    row.iter().map(|&n| params.invert(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_out_of_order_are_rejected() {
        let mut pipeline = ForecastPipeline::new();
        assert!(matches!(
            pipeline.prepare(),
            Err(PipelineError::NotFitted(_))
        ));
        assert!(matches!(
            pipeline.fit_baseline(),
            Err(PipelineError::NotFitted(_))
        ));
        assert!(matches!(
            pipeline.benchmark_baseline(),
            Err(PipelineError::NotFitted(_))
        ));
        assert!(matches!(
            pipeline.latest_window(),
            Err(PipelineError::NotFitted(_))
        ));
    }

    #[test]
    fn invalidate_clears_all_derived_state() {
        let mut pipeline = ForecastPipeline::new();
        pipeline.invalidate();
        assert!(pipeline.prices().is_none());
        assert!(pipeline.returns().is_none());
        assert!(pipeline.insights().is_none());
        assert!(pipeline.dataset().is_none());
        assert!(!pipeline.baseline().is_trained());
        assert!(pipeline.normalization_params().is_err());
    }
}
