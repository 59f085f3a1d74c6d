//! Provider traits and structured error types.
//!
//! The traits abstract over the network so the pipeline can run against
//! fixed in-memory data in tests. Providers return raw bars; validation
//! happens in one place at ingestion, not per provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw daily OHLCV bar as returned by a provider, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("insufficient history for {symbol}: {got} bars, need {need}")]
    InsufficientHistory {
        symbol: String,
        got: usize,
        need: usize,
    },

    #[error("invalid series: {0}")]
    InvalidSeries(String),

    #[error("universe acquisition failed: {0}")]
    UniverseUnavailable(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Source of daily OHLCV history for a single symbol.
pub trait BarProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch roughly `lookback_days` calendar days of daily bars up to today.
    fn fetch(&self, symbol: &str, lookback_days: u32) -> Result<Vec<RawBar>, DataError>;
}

/// Source of the instrument universe.
///
/// Implementations must return deduplicated, sorted identifiers with class
/// shares normalized for the bar provider (`BRK.B` → `BRK-B`). Failure
/// recovery (fallback lists) is the implementation's job — the pipeline
/// treats the returned list as authoritative.
pub trait UniverseProvider: Send + Sync {
    fn name(&self) -> &str;

    fn fetch(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_symbol() {
        let err = DataError::SymbolNotFound {
            symbol: "ZZZZ".into(),
        };
        assert!(err.to_string().contains("ZZZZ"));

        let err = DataError::InsufficientHistory {
            symbol: "NEWIPO".into(),
            got: 12,
            need: 200,
        };
        let msg = err.to_string();
        assert!(msg.contains("NEWIPO"));
        assert!(msg.contains("12"));
        assert!(msg.contains("200"));
    }
}
