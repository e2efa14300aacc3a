use serde::{Deserialize, Serialize};

use crate::analysis::returns_engine::{
    max_drawdown, rolling_volatility, sharpe_ratio, sma, total_return,
};
use crate::config::{InsightConfig, TRADING_DAYS_PER_YEAR, Trend};
use crate::domain::{PriceSeries, ReturnSeries};
use crate::error::PipelineError;
use crate::utils::{mean_and_stddev, min_max};

/// Read-only statistical snapshot of one loaded series.
///
/// Computed once per load and discarded on reload; nothing here survives a
/// refresh of the underlying data. Every field is always present; values
/// that need more history than the series provides are `None`, never
/// silently absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub total_days: usize,
    pub date_range: String,
    pub first_price: f64,
    pub last_price: f64,

    /// Relative change first -> last price.
    pub total_return: f64,
    /// Worst running-peak drawdown over the whole series.
    pub max_drawdown: f64,

    pub mean_daily_return: f64,
    pub std_daily_return: f64,
    /// Population daily std annualized by sqrt(252).
    pub annualized_volatility: f64,
    /// `None` when the daily std is exactly zero.
    pub sharpe_ratio: Option<f64>,
    /// Fraction of days with a strictly positive return.
    pub positive_day_fraction: f64,

    /// SMA-crossover verdict; `None` until the slow SMA has a value.
    pub trend: Option<Trend>,
    /// `|fast - slow| / slow`, same availability as `trend`.
    pub trend_strength: Option<f64>,
    /// Whether the last price sits above the slow SMA.
    pub above_slow_sma: Option<bool>,
    pub sma_fast: Vec<f64>,
    pub sma_slow: Vec<f64>,

    pub rolling_volatility: Vec<f64>,
    pub current_rolling_vol: Option<f64>,
    pub avg_rolling_vol: Option<f64>,
    pub max_rolling_vol: Option<f64>,
    pub min_rolling_vol: Option<f64>,
}

impl Insights {
    /// Strict trend accessor: fails instead of comparing SMAs that do not
    /// exist yet.
    pub fn trend(&self) -> Result<Trend, PipelineError> {
        self.trend.ok_or_else(|| {
            PipelineError::InsufficientHistory(format!(
                "trend needs the slow SMA; series covers only {} days",
                self.total_days
            ))
        })
    }

    /// Structured summary for host UIs that consume JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Derive the full snapshot from a price series and its return series.
pub fn compute_insights(
    prices: &PriceSeries,
    returns: &ReturnSeries,
    config: &InsightConfig,
) -> Result<Insights, PipelineError> {
    if returns.is_empty() {
        return Err(PipelineError::InsufficientData {
            needed: 2,
            got: prices.len(),
        });
    }

    let (mean_daily, std_daily) = mean_and_stddev(returns.as_slice());
    let positive_days = returns.values.iter().filter(|r| **r > 0.0).count();

    let sma_fast = sma(&prices.prices, config.sma_fast);
    let sma_slow = sma(&prices.prices, config.sma_slow);
    let last_price = prices.last_price().unwrap_or(0.0);

    // Both SMA tails must exist before any crossover comparison happens.
    let crossover = match (sma_fast.last(), sma_slow.last()) {
        (Some(&fast), Some(&slow)) => Some((fast, slow)),
        _ => None,
    };
    let trend = crossover.map(|(fast, slow)| {
        if fast > slow {
            Trend::Bullish
        } else {
            Trend::Bearish
        }
    });
    let trend_strength = crossover.map(|(fast, slow)| ((fast - slow) / slow).abs());
    let above_slow_sma = crossover.map(|(_, slow)| last_price > slow);

    let rolling = rolling_volatility(returns.as_slice(), config.rolling_vol_window);
    let (current_vol, avg_vol, max_vol, min_vol) = if rolling.is_empty() {
        (None, None, None, None)
    } else {
        let (avg, _) = mean_and_stddev(&rolling);
        let (min, max) = min_max(&rolling);
        (rolling.last().copied(), Some(avg), Some(max), Some(min))
    };

    Ok(Insights {
        total_days: prices.len(),
        date_range: prices.date_range_label(),
        first_price: prices.first_price().unwrap_or(0.0),
        last_price,
        total_return: total_return(prices),
        max_drawdown: max_drawdown(&prices.prices),
        mean_daily_return: mean_daily,
        std_daily_return: std_daily,
        annualized_volatility: std_daily * TRADING_DAYS_PER_YEAR.sqrt(),
        sharpe_ratio: sharpe_ratio(returns.as_slice()),
        positive_day_fraction: positive_days as f64 / returns.len() as f64,
        trend,
        trend_strength,
        above_slow_sma,
        sma_fast,
        sma_slow,
        rolling_volatility: rolling,
        current_rolling_vol: current_vol,
        avg_rolling_vol: avg_vol,
        max_rolling_vol: max_vol,
        min_rolling_vol: min_vol,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::analysis::returns_engine::compute_returns;
    use crate::domain::PricePoint;

    fn series_of(prices: Vec<f64>) -> (PriceSeries, ReturnSeries) {
        let points = prices
            .into_iter()
            .enumerate()
            .map(|(i, price)| PricePoint {
                date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap() + chrono::Days::new(i as u64),
                price,
            })
            .collect();
        let series = PriceSeries::from_points(points);
        let returns = compute_returns(&series);
        (series, returns)
    }

    #[test]
    fn short_series_has_no_trend() {
        let (prices, returns) = series_of((0..100).map(|i| 100.0 + i as f64).collect());
        let insights = compute_insights(&prices, &returns, &InsightConfig::default()).unwrap();

        assert!(insights.trend.is_none());
        assert!(insights.trend_strength.is_none());
        assert!(insights.sma_slow.is_empty());
        assert!(matches!(
            insights.trend(),
            Err(PipelineError::InsufficientHistory(_))
        ));
    }

    #[test]
    fn steady_rise_reads_bullish() {
        let (prices, returns) = series_of((0..250).map(|i| 100.0 + i as f64).collect());
        let insights = compute_insights(&prices, &returns, &InsightConfig::default()).unwrap();

        assert_eq!(insights.trend().unwrap(), Trend::Bullish);
        assert_eq!(insights.above_slow_sma, Some(true));
        assert!(insights.trend_strength.unwrap() > 0.0);
        assert!(insights.max_drawdown == 0.0);
        assert!(insights.total_return > 0.0);
    }

    #[test]
    fn steady_fall_reads_bearish() {
        let (prices, returns) = series_of((0..250).map(|i| 500.0 - i as f64).collect());
        let insights = compute_insights(&prices, &returns, &InsightConfig::default()).unwrap();

        assert_eq!(insights.trend().unwrap(), Trend::Bearish);
        assert_eq!(insights.above_slow_sma, Some(false));
    }

    #[test]
    fn constant_series_guards_sharpe() {
        let (prices, returns) = series_of(vec![100.0; 250]);
        let insights = compute_insights(&prices, &returns, &InsightConfig::default()).unwrap();

        assert_eq!(insights.sharpe_ratio, None);
        assert_eq!(insights.annualized_volatility, 0.0);
        assert_eq!(insights.positive_day_fraction, 0.0);
    }

    #[test]
    fn single_point_is_insufficient() {
        let (prices, returns) = series_of(vec![100.0]);
        assert!(matches!(
            compute_insights(&prices, &returns, &InsightConfig::default()),
            Err(PipelineError::InsufficientData { .. })
        ));
    }

    #[test]
    fn snapshot_serializes_for_hosts() {
        let (prices, returns) = series_of((0..250).map(|i| 100.0 + i as f64).collect());
        let insights = compute_insights(&prices, &returns, &InsightConfig::default()).unwrap();

        let json = insights.to_json().unwrap();
        assert!(json.contains("\"trend\": \"Bullish\""));
        assert!(json.contains("\"total_days\": 250"));
    }

    #[test]
    fn rolling_vol_summary_present_with_enough_history() {
        let (prices, returns) =
            series_of((0..80).map(|i| 100.0 * (1.0 + 0.01 * (i % 7) as f64)).collect());
        let insights = compute_insights(&prices, &returns, &InsightConfig::default()).unwrap();

        assert!(!insights.rolling_volatility.is_empty());
        assert!(insights.current_rolling_vol.is_some());
        assert!(insights.min_rolling_vol.unwrap() <= insights.max_rolling_vol.unwrap());
    }
}
