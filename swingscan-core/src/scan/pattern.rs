//! Pattern classifier — labels the trailing chart shape.
//!
//! Rules are evaluated in priority order and the first match wins:
//! 1. Pennant: highs compress downward while lows compress upward across the
//!    window (endpoint comparison, not a full monotonic check).
//! 2. Flag: the whole window trades inside a tight range relative to its low.
//! 3. Breakout: everything else, including any window we cannot measure.
//!
//! The classifier is total: bad or missing data yields the fallback label,
//! never an error.

use crate::domain::PriceSeries;
use crate::strategy::PatternParams;
use serde::{Deserialize, Serialize};

/// Closed set of chart-shape labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternLabel {
    /// Converging highs and lows — a coiling pennant.
    Pennant,
    /// Tight sideways range — a flag/consolidation.
    Flag,
    /// Generic breakout setup (fallback).
    Breakout,
}

impl std::fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PatternLabel::Pennant => "PENNANT",
            PatternLabel::Flag => "FLAG",
            PatternLabel::Breakout => "BREAKOUT",
        };
        f.pad(label)
    }
}

/// Classify the trailing `params.window` bars of `series`.
pub fn classify_pattern(series: &PriceSeries, params: &PatternParams) -> PatternLabel {
    let bars = series.bars();
    if params.window < 2 || bars.len() < params.window {
        return PatternLabel::Breakout;
    }

    let window = &bars[bars.len() - params.window..];
    let first = &window[0];
    let last = &window[params.window - 1];

    if first.high.is_nan() || last.high.is_nan() || first.low.is_nan() || last.low.is_nan() {
        return PatternLabel::Breakout;
    }

    // Converging extremes: ceiling not rising, floor not falling.
    if first.high >= last.high && first.low <= last.low {
        return PatternLabel::Pennant;
    }

    let (high, low) = match (
        series.trailing_high(params.window),
        series.trailing_low(params.window),
    ) {
        (Some(h), Some(l)) if l > 0.0 => (h, l),
        _ => return PatternLabel::Breakout,
    };

    if (high - low) / low < params.flag_ratio {
        return PatternLabel::Flag;
    }

    PatternLabel::Breakout
}
