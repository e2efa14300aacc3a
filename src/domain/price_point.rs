use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observed daily close. `price` is guaranteed positive by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Chronologically ascending daily price history, one row per date.
///
/// Stored as parallel column vectors so the numeric code can work on plain
/// `&[f64]` slices without re-collecting.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PriceSeries {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
}

impl PriceSeries {
    /// Build from already sorted, already deduplicated points.
    pub fn from_points(points: Vec<PricePoint>) -> Self {
        let len = points.len();

        // Pre-allocate everything
        let mut date_vec = Vec::with_capacity(len);
        let mut price_vec = Vec::with_capacity(len);

        for p in points {
            date_vec.push(p.date);
            price_vec.push(p.price);
        }

        Self {
            dates: date_vec,
            prices: price_vec,
        }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn get_point(&self, idx: usize) -> PricePoint {
        PricePoint {
            date: self.dates[idx],
            price: self.prices[idx],
        }
    }

    pub fn first_price(&self) -> Option<f64> {
        self.prices.first().copied()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    /// Human-readable coverage label, e.g. `"2023-01-02 to 2024-06-28"`.
    pub fn date_range_label(&self) -> String {
        match (self.dates.first(), self.dates.last()) {
            (Some(first), Some(last)) => format!("{first} to {last}"),
            _ => String::from("empty"),
        }
    }
}
