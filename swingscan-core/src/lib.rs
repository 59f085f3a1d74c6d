//! SwingScan Core — screening engine, domain types, indicators, data boundary.
//!
//! This crate contains the deterministic heart of the screener:
//! - Domain types (bars, price series, candidates, ledger entries)
//! - Indicator implementations (SMA, RSI, ATR) with NaN warmup
//! - Confluence scoring, pattern classification, setup gates
//! - Adaptive threshold controller fed by the trade ledger
//! - Strategy configuration with named presets
//! - Data provider traits (historical bars, ticker universe)

pub mod data;
pub mod domain;
pub mod indicators;
pub mod scan;
pub mod strategy;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types are Send + Sync.
    ///
    /// The runner fans the per-ticker evaluation out across a thread pool,
    /// so everything it shares must cross thread boundaries.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::Candidate>();
        require_sync::<domain::Candidate>();
        require_send::<domain::LedgerEntry>();
        require_sync::<domain::LedgerEntry>();
        require_send::<domain::TradeStatus>();
        require_sync::<domain::TradeStatus>();

        require_send::<scan::IndicatorSet>();
        require_sync::<scan::IndicatorSet>();
        require_send::<scan::PatternLabel>();
        require_sync::<scan::PatternLabel>();

        require_send::<strategy::StrategyConfig>();
        require_sync::<strategy::StrategyConfig>();
        require_send::<strategy::ExitModel>();
        require_sync::<strategy::ExitModel>();

        require_send::<data::DataError>();
        require_sync::<data::DataError>();
    }
}
