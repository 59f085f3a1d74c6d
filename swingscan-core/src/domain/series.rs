//! PriceSeries — validated chronological bar history for one instrument.
//!
//! Construction is the single flattening/validation step between raw provider
//! output and indicator computation. After `PriceSeries::new` succeeds, every
//! bar is sane and dates strictly increase; downstream code never re-checks.

use super::bar::Bar;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("empty series for {symbol}")]
    Empty { symbol: String },

    #[error("bars out of order for {symbol} at index {index}")]
    OutOfOrder { symbol: String, index: usize },
}

/// Chronological daily bars for one symbol.
///
/// Owned transiently by the pipeline for the duration of one ticker's
/// evaluation and discarded after scoring.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series from raw bars: void and insane bars are dropped,
    /// remaining dates must strictly increase.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        let symbol = symbol.into();
        let bars: Vec<Bar> = bars.into_iter().filter(Bar::is_sane).collect();

        if bars.is_empty() {
            return Err(SeriesError::Empty { symbol });
        }

        for i in 1..bars.len() {
            if bars[i].date <= bars[i - 1].date {
                return Err(SeriesError::OutOfOrder { symbol, index: i });
            }
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent bar. The constructor rejects empty series, so this
    /// always exists.
    pub fn last_bar(&self) -> &Bar {
        self.bars.last().expect("PriceSeries is never empty")
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Highest high over the trailing `window` bars, or None if the series
    /// is shorter than the window.
    pub fn trailing_high(&self, window: usize) -> Option<f64> {
        if window == 0 || self.bars.len() < window {
            return None;
        }
        self.bars[self.bars.len() - window..]
            .iter()
            .map(|b| b.high)
            .fold(None, |acc, h| Some(acc.map_or(h, |a: f64| a.max(h))))
    }

    /// Lowest low over the trailing `window` bars.
    pub fn trailing_low(&self, window: usize) -> Option<f64> {
        if window == 0 || self.bars.len() < window {
            return None;
        }
        self.bars[self.bars.len() - window..]
            .iter()
            .map(|b| b.low)
            .fold(None, |acc, l| Some(acc.map_or(l, |a: f64| a.min(l))))
    }

    /// High-low range over the trailing `window` bars.
    pub fn trailing_range(&self, window: usize) -> Option<f64> {
        match (self.trailing_high(window), self.trailing_low(window)) {
            (Some(h), Some(l)) => Some(h - l),
            _ => None,
        }
    }

    /// Mean volume over the trailing `window` bars.
    pub fn trailing_avg_volume(&self, window: usize) -> Option<f64> {
        if window == 0 || self.bars.len() < window {
            return None;
        }
        let sum: u64 = self.bars[self.bars.len() - window..]
            .iter()
            .map(|b| b.volume)
            .sum();
        Some(sum as f64 / window as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Duration::days(day as i64),
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn drops_void_bars() {
        let mut bars = vec![bar(1, 10.0), bar(2, 11.0), bar(3, 12.0)];
        bars[1].close = f64::NAN;
        let series = PriceSeries::new("TEST", bars).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last_bar().close, 12.0);
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            PriceSeries::new("TEST", vec![]),
            Err(SeriesError::Empty { .. })
        ));
    }

    #[test]
    fn rejects_out_of_order() {
        let bars = vec![bar(3, 10.0), bar(1, 11.0)];
        assert!(matches!(
            PriceSeries::new("TEST", bars),
            Err(SeriesError::OutOfOrder { index: 1, .. })
        ));
    }

    #[test]
    fn trailing_high_and_low() {
        let bars = vec![bar(1, 10.0), bar(2, 14.0), bar(3, 12.0)];
        let series = PriceSeries::new("TEST", bars).unwrap();
        assert_eq!(series.trailing_high(2), Some(15.0)); // 14 + 1
        assert_eq!(series.trailing_low(2), Some(11.0)); // 12 - 1
        assert_eq!(series.trailing_high(5), None);
    }

    #[test]
    fn trailing_avg_volume() {
        let bars = vec![bar(1, 10.0), bar(2, 11.0), bar(3, 12.0)];
        let series = PriceSeries::new("TEST", bars).unwrap();
        assert_eq!(series.trailing_avg_volume(3), Some(1_000.0));
    }
}
