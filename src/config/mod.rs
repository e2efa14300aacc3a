//! Configuration module for the forecasting pipeline.

mod analysis;
mod types;

// Public
pub mod constants;

// Re-export commonly used items
pub use analysis::{BaselineConfig, InsightConfig, WindowConfig};
pub use constants::{FIELD_DELIMITER, LOG_PERFORMANCE, MIN_PRICE_ROWS, TRADING_DAYS_PER_YEAR};
pub use types::{ReturnClamp, SplitFraction, Trend};
