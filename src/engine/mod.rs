mod pipeline;

pub use pipeline::ForecastPipeline;
