// Return statistics and the per-load insights snapshot
mod insights;
mod returns_engine;

pub use insights::{Insights, compute_insights};
pub use returns_engine::{
    compute_returns, max_drawdown, rolling_volatility, sharpe_ratio, sma, total_return,
};
