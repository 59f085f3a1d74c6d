//! Relative Strength Index (RSI).
//!
//! Wilder smoothing of average gains and losses:
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss). Lookback: period.
//! Edge cases: avg_loss == 0 → 100; avg_gain == 0 → 0; flat series → 50.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
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

        // Per-bar close-to-close change; NaN poisons from its bar onward.
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for i in 1..=self.period {
            let ch = bars[i].close - bars[i - 1].close;
            if ch.is_nan() {
                return out;
            }
            if ch > 0.0 {
                avg_gain += ch;
            } else {
                avg_loss -= ch;
            }
        }
        avg_gain /= self.period as f64;
        avg_loss /= self.period as f64;
        out[self.period] = rsi_value(avg_gain, avg_loss);

        let alpha = 1.0 / self.period as f64;
        for i in (self.period + 1)..n {
            let ch = bars[i].close - bars[i - 1].close;
            if ch.is_nan() {
                return out;
            }
            let gain = ch.max(0.0);
            let loss = (-ch).max(0.0);
            avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
            avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
            out[i] = rsi_value(avg_gain, avg_loss);
        }

        out
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
