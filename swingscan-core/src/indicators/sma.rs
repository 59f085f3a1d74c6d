//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices. First valid value at index period-1.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut out = vec![f64::NAN; n];
        if n < self.period {
            return out;
        }

        for i in (self.period - 1)..n {
            let window = &bars[i + 1 - self.period..=i];
            if window.iter().any(|b| b.close.is_nan()) {
                continue;
            }
            let sum: f64 = window.iter().map(|b| b.close).sum();
            out[i] = sum / self.period as f64;
        }

        out
    }
}
