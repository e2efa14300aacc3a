// Modeling components: scaling, windowing, the naive baseline and the
// forecast-error engine.
mod baseline;
mod evaluator;
mod normalizer;
mod predictor;
mod window_builder;

pub use baseline::RandomWalkBaseline;
pub use evaluator::{BenchmarkResult, Evaluator};
pub use normalizer::{NormalizationParams, Normalizer};
pub use predictor::{EpochCallback, SequencePredictor};
pub use window_builder::{WindowedDataset, WindowedSample, build as build_windows};
