//! Ingestion — raw provider bars to a validated PriceSeries.
//!
//! The single choke point between network data and the engine: after this
//! step every series is chronological, sane, and long enough to evaluate.

use super::provider::{DataError, RawBar};
use crate::domain::{Bar, PriceSeries};

/// Validate raw bars into a PriceSeries, enforcing a minimum length.
///
/// Void and insane bars are dropped silently (holidays, bad prints); a
/// series that ends up shorter than `min_history` is rejected so the
/// pipeline can skip the instrument before any indicator work.
pub fn ingest_series(
    symbol: &str,
    raw: Vec<RawBar>,
    min_history: usize,
) -> Result<PriceSeries, DataError> {
    if raw.is_empty() {
        return Err(DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        });
    }

    let bars: Vec<Bar> = raw
        .into_iter()
        .map(|r| Bar {
            date: r.date,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            volume: r.volume,
        })
        .collect();

    let series = PriceSeries::new(symbol, bars)
        .map_err(|e| DataError::InvalidSeries(e.to_string()))?;

    if series.len() < min_history {
        return Err(DataError::InsufficientHistory {
            symbol: symbol.to_string(),
            got: series.len(),
            need: min_history,
        });
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(day: u32, close: f64) -> RawBar {
        RawBar {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Duration::days(day as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn accepts_clean_series() {
        let bars = (0..5).map(|i| raw(i, 100.0 + i as f64)).collect();
        let series = ingest_series("AAPL", bars, 3).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series.symbol(), "AAPL");
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            ingest_series("AAPL", vec![], 3),
            Err(DataError::SymbolNotFound { .. })
        ));
    }

    #[test]
    fn rejects_short_history_after_cleaning() {
        let mut bars: Vec<RawBar> = (0..5).map(|i| raw(i, 100.0)).collect();
        bars[1].close = f64::NAN;
        bars[3].close = f64::NAN;
        let err = ingest_series("AAPL", bars, 4).unwrap_err();
        assert!(matches!(
            err,
            DataError::InsufficientHistory { got: 3, need: 4, .. }
        ));
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let bars = vec![raw(3, 100.0), raw(1, 101.0), raw(4, 102.0)];
        assert!(matches!(
            ingest_series("AAPL", bars, 1),
            Err(DataError::InvalidSeries(_))
        ));
    }
}
