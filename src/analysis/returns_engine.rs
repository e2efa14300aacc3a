//! Return derivation and rolling statistics over a daily price series.

use itertools::Itertools;

use crate::config::TRADING_DAYS_PER_YEAR;
use crate::domain::{PriceSeries, ReturnSeries};
use crate::utils::mean_and_stddev;

/// Simple (not log) day-over-day returns: `(p[i+1] - p[i]) / p[i]`.
pub fn compute_returns(prices: &PriceSeries) -> ReturnSeries {
    let values = prices
        .prices
        .iter()
        .tuple_windows()
        .map(|(prev, next)| (next - prev) / prev)
        .collect();

    ReturnSeries { values }
}

/// Relative change from the first to the last observed price.
pub fn total_return(prices: &PriceSeries) -> f64 {
    match (prices.first_price(), prices.last_price()) {
        (Some(first), Some(last)) if first > 0.0 => (last - first) / first,
        _ => 0.0,
    }
}

/// Annualized rolling volatility over trailing `window`-day slices.
///
/// One value per position from `window` to `len`, i.e. `len - window + 1`
/// entries; empty when the series is shorter than the window. Uses the
/// population variance, annualized by `sqrt(252)`.
pub fn rolling_volatility(returns: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || returns.len() < window {
        return Vec::new();
    }

    let annualize = TRADING_DAYS_PER_YEAR.sqrt();
    let mut out = Vec::with_capacity(returns.len() - window + 1);
    for i in window..=returns.len() {
        let (_, std) = mean_and_stddev(&returns[i - window..i]);
        out.push(std * annualize);
    }
    out
}

/// Simple moving average of `period` values, defined from index `period-1`.
/// Empty when the series is shorter than the period.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    // O(1) rolling sum instead of re-summing every window.
    let mut out = Vec::with_capacity(values.len() - period + 1);
    let mut rolling: f64 = values[..period].iter().sum();
    out.push(rolling / period as f64);

    for i in period..values.len() {
        rolling += values[i] - values[i - period];
        out.push(rolling / period as f64);
    }
    out
}

/// Maximum peak-to-trough drawdown via a running peak. The peak never
/// decreases, so one forward pass suffices.
pub fn max_drawdown(prices: &[f64]) -> f64 {
    let Some(&first) = prices.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_dd: f64 = 0.0;
    for &price in &prices[1..] {
        if price > peak {
            peak = price;
        }
        let drawdown = (peak - price) / peak;
        if drawdown > max_dd {
            max_dd = drawdown;
        }
    }
    max_dd
}

/// Annualized mean/std ratio of daily returns. `None` when the standard
/// deviation is exactly zero; callers must not see an infinity here.
pub fn sharpe_ratio(returns: &[f64]) -> Option<f64> {
    let (mean, std) = mean_and_stddev(returns);
    if std == 0.0 {
        None
    } else {
        Some(mean / std * TRADING_DAYS_PER_YEAR.sqrt())
    }
}
