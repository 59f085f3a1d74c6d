//! Screening pipeline — one scan cycle, end to end.
//!
//! Shared cycle state (market health, adaptive threshold) is computed once
//! up front and never mutated during the scan, so the per-ticker work fans
//! out across the rayon pool. Results carry their universe index and are
//! sorted once after collection; ranking is deterministic regardless of
//! thread scheduling.
//!
//! Error policy: per-ticker failures skip that ticker, a dead benchmark
//! degrades scoring to fallback values, an unreadable ledger means zero
//! bias, a failed notification is logged and dropped. Only the snapshot
//! write can fail the cycle.

use crate::config::{ConfigError, ScanConfig};
use crate::ledger::LedgerStore;
use crate::notify::Notifier;
use crate::snapshot::{write_snapshot, ScanSnapshot, SnapshotError};
use chrono::NaiveDateTime;
use rayon::prelude::*;
use swingscan_core::data::{ingest_series, BarProvider, UniverseProvider};
use swingscan_core::domain::{round_cents, Candidate};
use swingscan_core::scan::{
    classify_pattern, confluence_score, effective_threshold, near_pivot, passes_setup_gate,
    threshold_bias, IndicatorSet,
};
use swingscan_core::strategy::{ExitModel, StrategyConfig};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// What a completed cycle produced, for callers that want to report.
#[derive(Debug)]
pub struct CycleOutcome {
    pub snapshot: ScanSnapshot,
    pub threshold: i32,
    pub bias: i32,
    pub evaluated: usize,
    pub skipped: usize,
    pub recorded_top_pick: bool,
}

/// Run one scan cycle.
///
/// `now` is injected so the cycle is a pure function of its providers and
/// ledger state; only the `lastUpdated` field and the ledger entry date
/// derive from it.
pub fn run_cycle(
    universe: &dyn UniverseProvider,
    bars: &dyn BarProvider,
    ledger: &LedgerStore,
    notifier: &dyn Notifier,
    config: &ScanConfig,
    now: NaiveDateTime,
) -> Result<CycleOutcome, CycleError> {
    let strategy = config.strategy()?;

    let tickers = universe.fetch();
    info!(count = tickers.len(), universe = universe.name(), "scan starting");

    let benchmark_closes = fetch_benchmark(bars, config, &strategy);
    let market_healthy = market_health(&benchmark_closes, strategy.long_ma_window);
    info!(market_healthy, benchmark = %config.benchmark, "market health computed");

    let entries = ledger.read();
    let bias = threshold_bias(&entries, &strategy.adaptive);
    let threshold = effective_threshold(strategy.base_strictness, bias);
    info!(threshold, bias, ledger_entries = entries.len(), "admission threshold set");

    // Read-only fan-out; each ticker's evaluation sees the same frozen
    // cycle state. Indices restore universe order before ranking.
    let mut indexed: Vec<(usize, Candidate)> = tickers
        .par_iter()
        .enumerate()
        .filter_map(|(i, ticker)| {
            evaluate_ticker(
                bars,
                ticker,
                config.lookback_days,
                &strategy,
                &benchmark_closes,
                market_healthy,
            )
            .map(|c| (i, c))
        })
        .collect();
    indexed.sort_by_key(|(i, _)| *i);

    let evaluated = tickers.len();
    let skipped = evaluated - indexed.len();
    let mut candidates: Vec<Candidate> = indexed
        .into_iter()
        .map(|(_, c)| c)
        .filter(|c| c.score >= threshold)
        .collect();
    // Stable: equal scores keep universe encounter order.
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    info!(found = candidates.len(), skipped, "scan complete");

    let recorded_top_pick = match candidates.first() {
        Some(top) => match ledger.record_top_pick(top, now.date()) {
            Ok(recorded) => recorded,
            Err(e) => {
                warn!(error = %e, "ledger write failed, cycle continues");
                false
            }
        },
        None => false,
    };

    let snapshot = ScanSnapshot {
        market_healthy,
        signals: candidates,
        last_updated: now.format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    write_snapshot(&config.output_path, &snapshot)?;

    notifier.notify(&snapshot.signals, market_healthy);

    Ok(CycleOutcome {
        snapshot,
        threshold,
        bias,
        evaluated,
        skipped,
        recorded_top_pick,
    })
}

/// Benchmark closes for market health and relative strength. A dead
/// benchmark yields an empty series: health defaults to true and every
/// score degrades to its fallback, matching the recovery policy.
fn fetch_benchmark(
    bars: &dyn BarProvider,
    config: &ScanConfig,
    strategy: &StrategyConfig,
) -> Vec<f64> {
    let raw = match bars.fetch(&config.benchmark, config.lookback_days) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(benchmark = %config.benchmark, error = %e, "benchmark fetch failed");
            return Vec::new();
        }
    };
    match ingest_series(&config.benchmark, raw, strategy.long_ma_window) {
        Ok(series) => series.closes(),
        Err(e) => {
            warn!(benchmark = %config.benchmark, error = %e, "benchmark unusable");
            Vec::new()
        }
    }
}

/// Benchmark close strictly above its long-window mean. Undefined (short or
/// missing benchmark) defaults to healthy.
fn market_health(benchmark_closes: &[f64], long_window: usize) -> bool {
    if benchmark_closes.len() < long_window || long_window == 0 {
        return true;
    }
    let tail = &benchmark_closes[benchmark_closes.len() - long_window..];
    if tail.iter().any(|v| v.is_nan()) {
        return true;
    }
    let mean: f64 = tail.iter().sum::<f64>() / long_window as f64;
    benchmark_closes[benchmark_closes.len() - 1] > mean
}

/// Evaluate one ticker: fetch → ingest → gate → score/classify → levels.
/// Every failure path returns None and the scan moves on.
fn evaluate_ticker(
    bars: &dyn BarProvider,
    ticker: &str,
    lookback_days: u32,
    strategy: &StrategyConfig,
    benchmark_closes: &[f64],
    market_healthy: bool,
) -> Option<Candidate> {
    let raw = match bars.fetch(ticker, lookback_days) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(ticker, error = %e, "fetch failed, skipping");
            return None;
        }
    };

    let series = match ingest_series(ticker, raw, strategy.min_history) {
        Ok(series) => series,
        Err(e) => {
            debug!(ticker, error = %e, "unusable history, skipping");
            return None;
        }
    };

    let indicators = IndicatorSet::compute(&series, strategy.long_ma_window);
    let latest = indicators.latest()?;
    let close = series.last_bar().close;

    if !passes_setup_gate(close, &latest, market_healthy, &strategy.gate) {
        return None;
    }
    if !near_pivot(&series, &strategy.gate) {
        return None;
    }

    let score = confluence_score(&series, &indicators, benchmark_closes, &strategy.score);
    let pattern = classify_pattern(&series, &strategy.pattern);
    let (goal, stop_loss) = exit_levels(close, latest.atr, &strategy.exit);
    let buy_at = series.trailing_high(strategy.gate.pivot_window)?;

    debug!(ticker, score, %pattern, "candidate emitted");
    Some(Candidate {
        ticker: ticker.to_string(),
        score,
        pattern,
        current_price: round_cents(close),
        buy_at: round_cents(buy_at),
        goal: round_cents(goal),
        stop_loss: round_cents(stop_loss),
        rsi: round_cents(latest.rsi),
    })
}

/// Goal and stop from the cycle's exit model. The two formulas are never
/// mixed within one cycle — the strategy carries exactly one.
fn exit_levels(close: f64, atr: f64, exit: &ExitModel) -> (f64, f64) {
    match *exit {
        ExitModel::PercentOffsets { goal_pct, stop_pct } => {
            (close * (1.0 + goal_pct), close * (1.0 - stop_pct))
        }
        ExitModel::AtrMultiple {
            goal_mult,
            stop_mult,
        } => (close + goal_mult * atr, close - stop_mult * atr),
    }
}
