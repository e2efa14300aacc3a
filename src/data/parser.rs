use chrono::NaiveDate;

use crate::config::{FIELD_DELIMITER, MIN_PRICE_ROWS};
use crate::domain::{PricePoint, PriceSeries};
use crate::error::PipelineError;

/// Turns raw delimited text into an ordered, deduplicated [`PriceSeries`].
///
/// The first line is a header and is discarded. Each data row is
/// `date;price`. Malformed rows (too few fields, non-positive or non-finite
/// price, empty or unparsable date) are dropped and counted, not errored.
/// Upstream exports are messy and a partial series is still useful as long
/// as enough rows survive.
#[derive(Debug, Clone)]
pub struct SeriesParser {
    delimiter: char,
    min_rows: usize,
}

impl Default for SeriesParser {
    fn default() -> Self {
        Self {
            delimiter: FIELD_DELIMITER,
            min_rows: MIN_PRICE_ROWS,
        }
    }
}

impl SeriesParser {
    pub fn new(delimiter: char, min_rows: usize) -> Self {
        Self {
            delimiter,
            min_rows,
        }
    }

    pub fn parse(&self, raw: &str) -> Result<PriceSeries, PipelineError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::Parse("input text is empty".into()));
        }

        let mut points: Vec<PricePoint> = Vec::new();
        let mut dropped: usize = 0;

        for line in trimmed.lines().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split(self.delimiter);
            let (Some(date_field), Some(price_field)) = (fields.next(), fields.next()) else {
                dropped += 1;
                continue;
            };

            let date_field = date_field.trim();
            let price: f64 = match price_field.trim().parse() {
                Ok(p) => p,
                Err(_) => {
                    dropped += 1;
                    continue;
                }
            };

            if date_field.is_empty() || !price.is_finite() || price <= 0.0 {
                dropped += 1;
                continue;
            }

            // Rows whose date parses under neither format are rejected here
            // rather than carried with an undefined sort key.
            let Some(date) = parse_row_date(date_field) else {
                dropped += 1;
                continue;
            };

            points.push(PricePoint { date, price });
        }

        // Input order is not trusted. Stable sort, then collapse duplicate
        // dates keeping the last input row (re-published corrections win).
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for p in points {
            match deduped.last_mut() {
                Some(last) if last.date == p.date => *last = p,
                _ => deduped.push(p),
            }
        }

        if dropped > 0 {
            log::warn!("[parser] dropped {dropped} malformed rows");
        }

        if deduped.len() < self.min_rows {
            return Err(PipelineError::InsufficientData {
                needed: self.min_rows,
                got: deduped.len(),
            });
        }

        let series = PriceSeries::from_points(deduped);
        log::info!(
            "[parser] {} rows accepted, range {}",
            series.len(),
            series.date_range_label(),
        );

        Ok(series)
    }
}

/// `DD.MM.YYYY` first, ISO `YYYY-MM-DD` as the generic fallback.
fn parse_row_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}
