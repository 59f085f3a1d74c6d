//! Ledger entries — the persisted outcome-feedback record.
//!
//! The screener appends an `open` entry when a cycle's top pick is recorded;
//! a separate resolution process flips statuses to `win`/`loss`. This module
//! only defines the entry type and the resolved-outcome statistics the
//! adaptive threshold controller consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome status of a recorded top pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Win,
    Loss,
}

/// One historical top-pick record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub ticker: String,
    pub entry_price: f64,
    pub goal: f64,
    pub stop: f64,
    pub date: NaiveDate,
    pub status: TradeStatus,
}

impl LedgerEntry {
    pub fn is_resolved(&self) -> bool {
        self.status != TradeStatus::Open
    }
}

/// Win/loss statistics over the resolved portion of a ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerStats {
    pub resolved: usize,
    pub wins: usize,
}

impl LedgerStats {
    /// Count resolved entries and wins.
    pub fn from_entries(entries: &[LedgerEntry]) -> Self {
        let resolved = entries.iter().filter(|e| e.is_resolved()).count();
        let wins = entries
            .iter()
            .filter(|e| e.status == TradeStatus::Win)
            .count();
        Self { resolved, wins }
    }

    /// Realized win rate in percent. None when nothing has resolved.
    pub fn win_rate(&self) -> Option<f64> {
        if self.resolved == 0 {
            None
        } else {
            Some(self.wins as f64 / self.resolved as f64 * 100.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ticker: &str, status: TradeStatus) -> LedgerEntry {
        LedgerEntry {
            ticker: ticker.into(),
            entry_price: 100.0,
            goal: 110.0,
            stop: 95.0,
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            status,
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&entry("AAPL", TradeStatus::Open)).unwrap();
        assert!(json.contains("\"status\":\"open\""));
        let back: LedgerEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, TradeStatus::Open);
    }

    #[test]
    fn stats_ignore_open_entries() {
        let entries = vec![
            entry("A", TradeStatus::Win),
            entry("B", TradeStatus::Open),
            entry("C", TradeStatus::Loss),
            entry("D", TradeStatus::Win),
        ];
        let stats = LedgerStats::from_entries(&entries);
        assert_eq!(stats.resolved, 3);
        assert_eq!(stats.wins, 2);
        let rate = stats.win_rate().unwrap();
        assert!((rate - 66.666).abs() < 0.01);
    }

    #[test]
    fn win_rate_none_when_all_open() {
        let entries = vec![entry("A", TradeStatus::Open)];
        assert_eq!(LedgerStats::from_entries(&entries).win_rate(), None);
    }
}
