//! Confluence scorer — additive setup-quality score in [1, 100].
//!
//! Each bonus is gated by its own predicate and awarded independently; the
//! score is the base plus whatever bonuses fire, clamped into range. Any
//! missing prerequisite (short history, NaN, empty benchmark) aborts the
//! whole computation and yields the preset's fallback score instead — the
//! scorer never errors and never returns out of range.

use crate::domain::PriceSeries;
use crate::scan::IndicatorSet;
use crate::strategy::ScoreParams;

/// Score one instrument against the benchmark.
///
/// Pure function of its inputs; determinism is load-bearing for the
/// pipeline's idempotence guarantee.
pub fn confluence_score(
    series: &PriceSeries,
    indicators: &IndicatorSet,
    benchmark_closes: &[f64],
    params: &ScoreParams,
) -> i32 {
    try_score(series, indicators, benchmark_closes, params)
        .unwrap_or(params.fallback)
        .clamp(1, 100)
}

fn try_score(
    series: &PriceSeries,
    indicators: &IndicatorSet,
    benchmark_closes: &[f64],
    params: &ScoreParams,
) -> Option<i32> {
    let latest = indicators.latest()?;
    let close = series.last_bar().close;
    let mut score = params.base;

    // Trend alignment: price above a strictly descending MA stack.
    if close > latest.ma20 && latest.ma20 > latest.ma50 && latest.ma50 > latest.ma_long {
        score += params.trend_bonus;
    }

    // MA slope: the mid average itself must be rising, not just price.
    let ma50_prev = indicators.ma50_before(params.slope_lookback)?;
    if latest.ma50 > ma50_prev {
        score += params.slope_bonus;
    }

    // Volatility contraction: range shrinks strictly across nested windows.
    let [w_long, w_mid, w_short] = params.contraction_windows;
    let range_long = series.trailing_range(w_long)?;
    let range_mid = series.trailing_range(w_mid)?;
    let range_short = series.trailing_range(w_short)?;
    if range_long > range_mid && range_mid > range_short {
        score += params.contraction_bonus;
    }

    // Relative strength vs the benchmark over the lookback.
    let bench_now = benchmark_closes
        .last()
        .copied()
        .filter(|v| !v.is_nan() && *v > 0.0)?;
    let bench_then = benchmark_closes
        .len()
        .checked_sub(1 + params.rs_lookback)
        .map(|i| benchmark_closes[i])
        .filter(|v| !v.is_nan() && *v > 0.0)?;
    let close_then = series
        .len()
        .checked_sub(1 + params.rs_lookback)
        .map(|i| series.bars()[i].close)?;
    if close / bench_now > close_then / bench_then {
        score += params.rs_bonus;
    }

    // Volume intensity, tiered: the stronger multiple earns the larger bonus.
    let avg_volume = series
        .trailing_avg_volume(params.volume_avg_window)
        .filter(|v| *v > 0.0)?;
    let volume = series.last_bar().volume as f64;
    if volume > params.volume_hi_mult * avg_volume {
        score += params.volume_bonus_hi;
    } else if volume > params.volume_lo_mult * avg_volume {
        score += params.volume_bonus_lo;
    }

    // RSI golden zone: neither oversold nor overbought.
    if latest.rsi >= params.rsi_zone_lo && latest.rsi <= params.rsi_zone_hi {
        score += params.rsi_zone_bonus;
    }

    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;
    use crate::strategy::StrategyConfig;
    use chrono::NaiveDate;

    /// Steady uptrend with a volume spike on the last bar.
    fn strong_series(n: usize, last_volume: u64) -> PriceSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars: Vec<Bar> = (0..n)
            .map(|i| {
                let close = 50.0 + i as f64 * 0.5;
                // Range tightens toward the present.
                let spread = 3.0 * (n - i) as f64 / n as f64 + 0.2;
                Bar {
                    date: base + chrono::Duration::days(i as i64),
                    open: close - 0.1,
                    high: close + spread,
                    low: close - spread,
                    close,
                    volume: if i == n - 1 { last_volume } else { 1_000_000 },
                }
            })
            .collect();
        PriceSeries::new("TEST", bars).unwrap()
    }

    /// Flat benchmark: any rising instrument outperforms it.
    fn flat_benchmark(n: usize) -> Vec<f64> {
        vec![400.0; n]
    }

    #[test]
    fn strong_setup_collects_bonuses() {
        let config = StrategyConfig::classic();
        let series = strong_series(220, 4_000_000);
        let ind = IndicatorSet::compute(&series, config.long_ma_window);
        let bench = flat_benchmark(220);

        let score = confluence_score(&series, &ind, &bench, &config.score);
        // base 50 + trend 15 + slope 5 + contraction 10 + rs 10 + volume 10
        // (4x avg) — RSI is pinned at 100 in a pure uptrend, so no zone bonus.
        assert_eq!(score, 100);
    }

    #[test]
    fn volume_tiers_award_differently() {
        let config = StrategyConfig::classic();
        let bench = flat_benchmark(220);

        let spike = strong_series(220, 4_000_000); // > 3x average
        let mild = strong_series(220, 2_000_000); // > 1.5x average
        let quiet = strong_series(220, 1_000_000); // at average

        let ind_spike = IndicatorSet::compute(&spike, config.long_ma_window);
        let ind_mild = IndicatorSet::compute(&mild, config.long_ma_window);
        let ind_quiet = IndicatorSet::compute(&quiet, config.long_ma_window);

        let s_spike = confluence_score(&spike, &ind_spike, &bench, &config.score);
        let s_mild = confluence_score(&mild, &ind_mild, &bench, &config.score);
        let s_quiet = confluence_score(&quiet, &ind_quiet, &bench, &config.score);

        assert!(s_spike > s_mild, "{s_spike} vs {s_mild}");
        assert!(s_mild > s_quiet, "{s_mild} vs {s_quiet}");
    }

    #[test]
    fn short_history_returns_fallback() {
        let config = StrategyConfig::classic();
        let series = strong_series(30, 1_000_000);
        let ind = IndicatorSet::compute(&series, config.long_ma_window);
        let bench = flat_benchmark(30);

        let score = confluence_score(&series, &ind, &bench, &config.score);
        assert_eq!(score, config.score.fallback.clamp(1, 100));
    }

    #[test]
    fn empty_benchmark_returns_fallback() {
        let config = StrategyConfig::classic();
        let series = strong_series(220, 1_000_000);
        let ind = IndicatorSet::compute(&series, config.long_ma_window);

        let score = confluence_score(&series, &ind, &[], &config.score);
        assert_eq!(score, config.score.fallback.clamp(1, 100));
    }

    #[test]
    fn nan_benchmark_returns_fallback() {
        let config = StrategyConfig::classic();
        let series = strong_series(220, 1_000_000);
        let ind = IndicatorSet::compute(&series, config.long_ma_window);
        let bench = vec![f64::NAN; 220];

        let score = confluence_score(&series, &ind, &bench, &config.score);
        assert_eq!(score, config.score.fallback.clamp(1, 100));
    }

    #[test]
    fn zero_fallback_clamps_to_one() {
        let config = StrategyConfig::coil();
        assert_eq!(config.score.fallback, 0);
        let series = strong_series(30, 1_000_000);
        let ind = IndicatorSet::compute(&series, config.long_ma_window);

        let score = confluence_score(&series, &ind, &[], &config.score);
        assert_eq!(score, 1);
    }

    #[test]
    fn downtrend_scores_near_base() {
        let config = StrategyConfig::classic();
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars: Vec<Bar> = (0..220)
            .map(|i| {
                let close = 200.0 - i as f64 * 0.5;
                Bar {
                    date: base + chrono::Duration::days(i as i64),
                    open: close + 0.1,
                    high: close + 2.0,
                    low: close - 2.0,
                    close,
                    volume: 1_000_000,
                }
            })
            .collect();
        let series = PriceSeries::new("TEST", bars).unwrap();
        let ind = IndicatorSet::compute(&series, config.long_ma_window);
        let bench = flat_benchmark(220);

        let score = confluence_score(&series, &ind, &bench, &config.score);
        // No trend stack, falling MA50, underperforming the benchmark,
        // flat volume, RSI pinned low. Only the contraction term fires —
        // a steady drift always spans more range over a longer window.
        assert_eq!(score, config.score.base + config.score.contraction_bonus);
    }
}
