//! Setup gates — cheap rejections before scoring.
//!
//! Two gates run in order. The setup gate requires trend, market health, and
//! a workable RSI simultaneously; the proximity gate requires price to sit
//! near its trailing pivot high so the instrument is actually set up to
//! break out rather than merely trending. Missing data rejects.

use crate::domain::PriceSeries;
use crate::scan::indicator_set::LatestIndicators;
use crate::strategy::GateParams;

/// Trend / market-health / RSI-band gate. All three must hold.
pub fn passes_setup_gate(
    close: f64,
    latest: &LatestIndicators,
    market_healthy: bool,
    params: &GateParams,
) -> bool {
    let trending = close > latest.ma50;
    let rsi_workable = latest.rsi > params.rsi_lo && latest.rsi < params.rsi_hi;
    trending && rsi_workable && market_healthy
}

/// Pivot proximity: close within `params.pivot_proximity` of the trailing
/// `pivot_window`-bar high.
pub fn near_pivot(series: &PriceSeries, params: &GateParams) -> bool {
    let Some(pivot_high) = series.trailing_high(params.pivot_window) else {
        return false;
    };
    series.last_bar().close > pivot_high * (1.0 - params.pivot_proximity)
}
