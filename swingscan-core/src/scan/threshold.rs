//! Adaptive threshold controller — ledger-fed admission feedback.
//!
//! A proportional controller with a dead band and no memory beyond the
//! persisted ledger: every cycle recomputes the bias from scratch. Below the
//! low watermark the bar rises (the system underperformed); above the high
//! watermark it drops slightly. Exactly at a watermark nothing happens —
//! both boundaries are exclusive.

use crate::domain::{LedgerEntry, LedgerStats};
use crate::strategy::AdaptiveBands;
use tracing::debug;

/// Bias derived from the ledger's resolved entries.
///
/// Returns 0 when fewer than `bands.min_sample` entries have resolved —
/// insufficient evidence to adapt.
pub fn threshold_bias(entries: &[LedgerEntry], bands: &AdaptiveBands) -> i32 {
    let stats = LedgerStats::from_entries(entries);
    if stats.resolved < bands.min_sample {
        return 0;
    }
    let Some(win_rate) = stats.win_rate() else {
        return 0;
    };

    let bias = if win_rate < bands.low_watermark {
        bands.tighten_by
    } else if win_rate > bands.high_watermark {
        -bands.loosen_by
    } else {
        0
    };

    debug!(
        win_rate,
        resolved = stats.resolved,
        bias,
        "adaptive threshold bias"
    );
    bias
}

/// The cycle's effective admission threshold.
pub fn effective_threshold(base_strictness: i32, bias: i32) -> i32 {
    base_strictness + bias
}
