use anyhow::Result;
use async_trait::async_trait;

use return_bench::{
    EpochCallback, Evaluator, ForecastPipeline, PipelineError, SequencePredictor,
    StaticTextProvider, WindowedSample,
};

/// Stand-in for the external sequence model: forecasts every horizon step as
/// the window's last value. Deterministic, so benchmark numbers are stable.
struct LastValuePredictor {
    horizon: usize,
    trained: bool,
    last_loss: Option<f64>,
}

impl LastValuePredictor {
    fn new(horizon: usize) -> Self {
        Self {
            horizon,
            trained: false,
            last_loss: None,
        }
    }

    fn training_loss(train: &[WindowedSample]) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for sample in train {
            let last = *sample.input.last().unwrap();
            for &target in &sample.target {
                let error = target - last;
                sum += error * error;
                count += 1;
            }
        }
        if count == 0 { 0.0 } else { sum / count as f64 }
    }
}

#[async_trait]
impl SequencePredictor for LastValuePredictor {
    async fn fit(
        &mut self,
        train: &[WindowedSample],
        epochs: usize,
        on_epoch_end: EpochCallback<'_>,
    ) -> Result<()> {
        let loss = Self::training_loss(train);
        for epoch in 0..epochs {
            on_epoch_end(epoch, loss);
        }
        self.trained = true;
        self.last_loss = Some(loss);
        Ok(())
    }

    async fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        let last = *input.last().unwrap();
        Ok(vec![last; self.horizon])
    }

    fn is_trained(&self) -> bool {
        self.trained
    }

    fn last_loss(&self) -> Option<f64> {
        self.last_loss
    }
}

/// Deterministic wobbly uptrend: long enough for the slow SMA and the
/// default 60/5 windowing, with both positive and negative daily returns.
fn synthetic_csv(days: usize) -> String {
    let mut text = String::from("date;close\n");
    let start = chrono::NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    for i in 0..days {
        let date = start + chrono::Days::new(i as u64);
        let price = 100.0 + 0.3 * i as f64 + 3.0 * (i as f64).sin();
        text.push_str(&format!("{};{price:.4}\n", date.format("%d.%m.%Y")));
    }
    text
}

#[tokio::test]
async fn full_pipeline_from_provider_to_benchmark() {
    let _ = env_logger::builder().is_test(true).try_init();

    let provider = StaticTextProvider::new(synthetic_csv(320));
    let mut pipeline = ForecastPipeline::new();

    // ── Load ──────────────────────────────────────────────────────────────
    let insights = pipeline.load(&provider).await.unwrap();
    assert_eq!(insights.total_days, 320);
    assert!(insights.total_return > 0.0);
    assert!(insights.trend().is_ok(), "320 days covers the slow SMA");

    // ── Prepare ───────────────────────────────────────────────────────────
    {
        let dataset = pipeline.prepare().unwrap();
        // 319 returns, window 60, horizon 5 -> 255 samples, floor split 204/51.
        assert_eq!(dataset.total_samples(), 255);
        assert_eq!(dataset.train.len(), 204);
        assert_eq!(dataset.test.len(), 51);
    }

    // Normalization round-trips every observed return.
    let params = pipeline.normalization_params().unwrap();
    for &r in &pipeline.returns().unwrap().values {
        assert!((params.invert(params.apply(r)) - r).abs() < 1e-12);
    }

    // ── Baseline ──────────────────────────────────────────────────────────
    pipeline.fit_baseline().unwrap();
    assert!(pipeline.baseline().is_trained());
    let baseline_result = pipeline.benchmark_baseline().unwrap();
    assert_eq!(baseline_result.sample_size, 51 * 5);
    assert!(baseline_result.rmse > 0.0);
    assert!(baseline_result.rmse >= baseline_result.mae);
    assert!((0.0..=100.0).contains(&baseline_result.direction_accuracy));

    // ── External model ────────────────────────────────────────────────────
    let mut model = LastValuePredictor::new(5);
    let mut epochs_seen = Vec::new();
    pipeline
        .train_model(&mut model, 3, &mut |epoch, loss| {
            epochs_seen.push((epoch, loss));
        })
        .await
        .unwrap();

    assert_eq!(epochs_seen.len(), 3);
    assert_eq!(epochs_seen[0].0, 0);
    assert!(model.is_trained());
    // The callback reports the real loss, identical to the model's own.
    assert_eq!(model.last_loss().unwrap(), epochs_seen[2].1);

    let model_result = pipeline.benchmark_model(&model).await.unwrap();
    assert_eq!(model_result.sample_size, baseline_result.sample_size);
    assert!(model_result.rmse > 0.0);

    let improvement = Evaluator::compare(&baseline_result, &model_result);
    assert!(improvement.is_finite());

    // ── Forecast in price space ───────────────────────────────────────────
    let window = pipeline.latest_window().unwrap();
    assert_eq!(window.len(), 60);
    let forecast = model.predict(&window).await.unwrap();
    let path = pipeline.forecast_prices(&forecast).unwrap();
    assert_eq!(path.len(), 5);
    assert!(path.iter().all(|p| *p > 0.0));
}

#[tokio::test]
async fn price_path_compounds_from_last_close() {
    let provider = StaticTextProvider::new(synthetic_csv(200));
    let mut pipeline = ForecastPipeline::new();
    pipeline.load(&provider).await.unwrap();
    pipeline.prepare().unwrap();

    let params = pipeline.normalization_params().unwrap();
    let last_price = pipeline.prices().unwrap().last_price().unwrap();

    // A constant +1% forecast must compound multiplicatively.
    let forecast = vec![params.apply(0.01); 3];
    let path = pipeline.forecast_prices(&forecast).unwrap();

    let mut expected = last_price;
    for price in path {
        expected *= 1.01;
        assert!((price - expected).abs() < 1e-6);
    }
}

#[tokio::test]
async fn reload_discards_all_derived_state() {
    let mut pipeline = ForecastPipeline::new();

    pipeline
        .load(&StaticTextProvider::new(synthetic_csv(320)))
        .await
        .unwrap();
    pipeline.prepare().unwrap();
    pipeline.fit_baseline().unwrap();
    assert!(pipeline.dataset().is_some());

    // Second load: windowing, normalization and the baseline all reset.
    pipeline
        .load(&StaticTextProvider::new(synthetic_csv(250)))
        .await
        .unwrap();
    assert_eq!(pipeline.insights().unwrap().total_days, 250);
    assert!(pipeline.dataset().is_none());
    assert!(pipeline.normalization_params().is_err());
    assert!(!pipeline.baseline().is_trained());
    assert!(matches!(
        pipeline.benchmark_baseline(),
        Err(PipelineError::NotFitted(_))
    ));
}

#[tokio::test]
async fn short_series_surfaces_a_messageable_error() {
    let mut pipeline = ForecastPipeline::new();
    let err = pipeline
        .load(&StaticTextProvider::new(synthetic_csv(30)))
        .await
        .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("need at least 65"), "got: {message}");
    assert!(message.contains("got 30"), "got: {message}");
}
