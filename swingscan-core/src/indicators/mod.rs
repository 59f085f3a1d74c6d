//! Concrete indicator implementations.
//!
//! Indicators are pure functions: bar history in, numeric series out. Output
//! has the same length as the input with the first `lookback()` values set to
//! `f64::NAN` (warmup). The screener precomputes each series once per ticker
//! and reads only the tail, so implementations favor clarity over rolling
//! incremental updates.

pub mod atr;
pub mod rsi;
pub mod sma;

pub use atr::Atr;
pub use rsi::Rsi;
pub use sma::Sma;

use crate::domain::Bar;

/// Trait for indicators.
///
/// No value at bar t may depend on data from bar t+1 or later.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_50", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars consumed before the first valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the entire bar series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars` with NaN for the
    /// warmup prefix and wherever the window contains a NaN input.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Create synthetic bars from close prices for testing.
///
/// open = prev close (or close for the first bar), high/low bracket the
/// body by 1.0, volume constant.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1_000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, epsilon={epsilon}"
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
