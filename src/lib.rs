// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod model;
pub mod utils;

// Re-export commonly used types outside of crate
pub use analysis::{Insights, compute_insights, compute_returns};
pub use config::{BaselineConfig, InsightConfig, Trend, WindowConfig};
pub use data::{RawSeriesProvider, SeriesParser, StaticTextProvider};
pub use domain::{PricePoint, PriceSeries, ReturnSeries};
pub use engine::ForecastPipeline;
pub use error::PipelineError;
pub use model::{
    BenchmarkResult, EpochCallback, Evaluator, NormalizationParams, Normalizer,
    RandomWalkBaseline, SequencePredictor, WindowedDataset, WindowedSample, build_windows,
};
