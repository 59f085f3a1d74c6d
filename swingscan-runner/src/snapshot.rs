//! Output snapshot — the JSON file downstream consumers poll.
//!
//! Shape: `{"marketHealthy": bool, "signals": [...], "lastUpdated": "..."}`
//! with signals ordered highest score first. Every numeric field on
//! `Candidate` is a primitive, so the encoder can only emit native JSON
//! numbers. A failed write is the one fatal error in a scan cycle —
//! downstream freshness depends on this file, so it surfaces instead of
//! being swallowed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swingscan_core::domain::Candidate;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One cycle's published result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanSnapshot {
    pub market_healthy: bool,
    pub signals: Vec<Candidate>,
    pub last_updated: String,
}

/// Write the snapshot, creating parent directories as needed.
pub fn write_snapshot(path: &Path, snapshot: &ScanSnapshot) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SnapshotError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json).map_err(|e| SnapshotError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(
        path = %path.display(),
        signals = snapshot.signals.len(),
        "snapshot written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingscan_core::scan::PatternLabel;

    fn candidate(ticker: &str, score: i32) -> Candidate {
        Candidate {
            ticker: ticker.into(),
            score,
            pattern: PatternLabel::Flag,
            current_price: 100.0,
            buy_at: 101.0,
            goal: 110.0,
            stop_loss: 95.0,
            rsi: 60.0,
        }
    }

    #[test]
    fn writes_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals.json");
        let snapshot = ScanSnapshot {
            market_healthy: true,
            signals: vec![candidate("NVDA", 90)],
            last_updated: "2025-08-06 09:30:00".into(),
        };
        write_snapshot(&path, &snapshot).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["marketHealthy"], true);
        assert_eq!(raw["lastUpdated"], "2025-08-06 09:30:00");
        assert_eq!(raw["signals"][0]["ticker"], "NVDA");
        assert_eq!(raw["signals"][0]["currentPrice"], 100.0);
        assert!(raw["signals"][0]["currentPrice"].is_f64());
    }

    #[test]
    fn creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep/nested/signals.json");
        let snapshot = ScanSnapshot {
            market_healthy: false,
            signals: vec![],
            last_updated: "2025-08-06 09:30:00".into(),
        };
        write_snapshot(&path, &snapshot).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let snapshot = ScanSnapshot {
            market_healthy: true,
            signals: vec![],
            last_updated: "x".into(),
        };
        // A path under a file (not a directory) cannot be created.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let path = blocker.join("signals.json");
        assert!(write_snapshot(&path, &snapshot).is_err());
    }

    #[test]
    fn roundtrip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals.json");
        let snapshot = ScanSnapshot {
            market_healthy: true,
            signals: vec![candidate("A", 95), candidate("B", 80), candidate("C", 72)],
            last_updated: "t".into(),
        };
        write_snapshot(&path, &snapshot).unwrap();

        let back: ScanSnapshot =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, snapshot);
        let scores: Vec<i32> = back.signals.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![95, 80, 72]);
    }
}
