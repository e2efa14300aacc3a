// Domain types and value objects
mod price_point;
mod return_series;

// Re-export commonly used types to the world
pub use price_point::{PricePoint, PriceSeries};
pub use return_series::ReturnSeries;
