//! IndicatorSet — precomputed indicator series for one instrument.
//!
//! All series are computed once per ticker and queried by index. Accessors
//! return `None` for out-of-range indices and NaN warmup values, so callers
//! can gate on missing history without inspecting NaN themselves.

use crate::domain::PriceSeries;
use crate::indicators::{Atr, Indicator, Rsi, Sma};

/// Moving-average windows used by the trend stack. The long window is
/// preset-dependent (150 or 200) and passed at construction.
pub const MA_SHORT: usize = 20;
pub const MA_MID: usize = 50;

/// RSI and ATR periods are fixed across presets.
pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;

/// Precomputed per-bar indicator values attached to a PriceSeries.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    ma20: Vec<f64>,
    ma50: Vec<f64>,
    ma_long: Vec<f64>,
    rsi: Vec<f64>,
    atr: Vec<f64>,
    long_window: usize,
}

impl IndicatorSet {
    /// Compute every series the scorer and gates consume.
    pub fn compute(series: &PriceSeries, long_window: usize) -> Self {
        let bars = series.bars();
        Self {
            ma20: Sma::new(MA_SHORT).compute(bars),
            ma50: Sma::new(MA_MID).compute(bars),
            ma_long: Sma::new(long_window).compute(bars),
            rsi: Rsi::new(RSI_PERIOD).compute(bars),
            atr: Atr::new(ATR_PERIOD).compute(bars),
            long_window,
        }
    }

    pub fn long_window(&self) -> usize {
        self.long_window
    }

    fn valid(series: &[f64], index: usize) -> Option<f64> {
        series.get(index).copied().filter(|v| !v.is_nan())
    }

    pub fn ma20_at(&self, index: usize) -> Option<f64> {
        Self::valid(&self.ma20, index)
    }

    pub fn ma50_at(&self, index: usize) -> Option<f64> {
        Self::valid(&self.ma50, index)
    }

    pub fn ma_long_at(&self, index: usize) -> Option<f64> {
        Self::valid(&self.ma_long, index)
    }

    pub fn rsi_at(&self, index: usize) -> Option<f64> {
        Self::valid(&self.rsi, index)
    }

    pub fn atr_at(&self, index: usize) -> Option<f64> {
        Self::valid(&self.atr, index)
    }

    /// Index of the most recent bar.
    pub fn last_index(&self) -> usize {
        self.ma20.len().saturating_sub(1)
    }

    /// Latest values, all-or-nothing. The screener only ever evaluates the
    /// newest bar; a None here means the instrument lacks history.
    pub fn latest(&self) -> Option<LatestIndicators> {
        let i = self.last_index();
        Some(LatestIndicators {
            ma20: self.ma20_at(i)?,
            ma50: self.ma50_at(i)?,
            ma_long: self.ma_long_at(i)?,
            rsi: self.rsi_at(i)?,
            atr: self.atr_at(i)?,
        })
    }

    /// MA50 value `lookback` bars before the latest bar.
    pub fn ma50_before(&self, lookback: usize) -> Option<f64> {
        let i = self.last_index().checked_sub(lookback)?;
        Self::valid(&self.ma50, i)
    }
}

/// Snapshot of every indicator at the most recent bar.
#[derive(Debug, Clone, Copy)]
pub struct LatestIndicators {
    pub ma20: f64,
    pub ma50: f64,
    pub ma_long: f64,
    pub rsi: f64,
    pub atr: f64,
}
