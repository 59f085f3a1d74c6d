//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR is the Wilder-smoothed TR (alpha = 1/period). Lookback: period.
//! Used by the pipeline to size goal and stop levels proportionally to
//! recent volatility.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

/// True Range series. TR[0] = high[0] - low[0] (no previous close).
fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = vec![f64::NAN; n];
    if n == 0 {
        return tr;
    }

    if !bars[0].high.is_nan() && !bars[0].low.is_nan() {
        tr[0] = bars[0].high - bars[0].low;
    }

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        if h.is_nan() || l.is_nan() || pc.is_nan() {
            continue;
        }
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }

    tr
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut out = vec![f64::NAN; n];
        if n < self.period + 1 {
            return out;
        }

        let tr = true_range(bars);

        // Seed: mean TR over bars 1..=period (TR[0] lacks a previous close).
        let seed_window = &tr[1..=self.period];
        if seed_window.iter().any(|v| v.is_nan()) {
            return out;
        }
        let mut atr = seed_window.iter().sum::<f64>() / self.period as f64;
        out[self.period] = atr;

        let alpha = 1.0 / self.period as f64;
        for i in (self.period + 1)..n {
            if tr[i].is_nan() {
                return out;
            }
            atr = alpha * tr[i] + (1.0 - alpha) * atr;
            out[i] = atr;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};
    use chrono::NaiveDate;

    fn bar(day: u32, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Duration::days(day as i64),
            open: close,
            high,
            low,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn true_range_uses_gap_from_prev_close() {
        // Bar 1 gaps up: TR = high - prev_close, not high - low.
        let bars = vec![bar(0, 101.0, 99.0, 100.0), bar(1, 110.0, 108.0, 109.0)];
        let tr = true_range(&bars);
        assert_approx(tr[0], 2.0, 1e-12);
        assert_approx(tr[1], 10.0, 1e-12);
    }

    #[test]
    fn atr_constant_range() {
        // Every bar has TR = 2.0 (high = close + 1, low = close - 1, flat closes).
        let bars = make_bars(&[100.0; 10]);
        let out = Atr::new(3).compute(&bars);
        assert!(out[2].is_nan());
        assert_approx(out[3], 2.0, 1e-9);
        assert_approx(out[9], 2.0, 1e-9);
    }

    #[test]
    fn atr_warmup_length() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0]);
        let out = Atr::new(3).compute(&bars);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert!(!out[3].is_nan());
    }

    #[test]
    fn atr_too_few_bars_all_nan() {
        let bars = make_bars(&[100.0, 101.0]);
        let out = Atr::new(14).compute(&bars);
        assert!(out.iter().all(|v| v.is_nan()));
    }
}
