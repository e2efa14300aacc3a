// Top Level Constants
pub const LOG_PERFORMANCE: bool = true;

/// A series shorter than this cannot support the default window/horizon
/// split plus the slow statistics, so the parser rejects it outright.
pub const MIN_PRICE_ROWS: usize = 65;

/// Annualization base for daily statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Column separator of the raw input rows (`date;price`).
pub const FIELD_DELIMITER: char = ';';

pub mod windowing {
    use crate::config::{SplitFraction, WindowConfig};

    pub const WINDOW_SIZE: usize = 60;
    pub const HORIZON: usize = 5;
    pub const TEST_SPLIT: SplitFraction = SplitFraction::new(0.2);

    pub const DEFAULT: WindowConfig = WindowConfig {
        window_size: WINDOW_SIZE,
        horizon: HORIZON,
        test_split: TEST_SPLIT,
    };
}

pub mod insights {
    use crate::config::InsightConfig;

    pub const SMA_FAST: usize = 50;
    pub const SMA_SLOW: usize = 200;
    pub const ROLLING_VOL_WINDOW: usize = 20;

    pub const DEFAULT: InsightConfig = InsightConfig {
        sma_fast: SMA_FAST,
        sma_slow: SMA_SLOW,
        rolling_vol_window: ROLLING_VOL_WINDOW,
    };
}

pub mod baseline {
    use crate::config::{BaselineConfig, ReturnClamp};

    pub const OUTLIER_BOUND: f64 = 1.0;
    pub const VARIANCE_FLOOR: f64 = 1e-6;
    pub const RETURN_CLAMP: ReturnClamp = ReturnClamp::new(0.05);
    /// Std assumed before the first fit (mirrors a ~1% daily move).
    pub const UNFITTED_STD: f64 = 0.01;

    pub const DEFAULT: BaselineConfig = BaselineConfig {
        outlier_bound: OUTLIER_BOUND,
        variance_floor: VARIANCE_FLOOR,
        clamp: RETURN_CLAMP,
    };
}
