//! Trade ledger store — bounded JSON persistence of top-pick outcomes.
//!
//! On-disk format is a single JSON object `{"history": [...]}` so the web
//! front end can consume it directly. The store is read-modify-write: the
//! cycle reads once up front (for the adaptive threshold) and writes at most
//! once (after recording the top pick). An internal mutex guards the
//! read-modify-write in case two cycles ever overlap in one process.
//!
//! Statuses transition open → win/loss outside this process; the store only
//! ever appends `open` entries and evicts the oldest beyond capacity.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use swingscan_core::domain::{Candidate, LedgerEntry, TradeStatus};
use thiserror::Error;
use tracing::{info, warn};

/// Most recent entries retained after eviction.
pub const LEDGER_CAPACITY: usize = 50;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("write ledger {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialize ledger: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    history: Vec<LedgerEntry>,
}

/// File-backed ledger store.
pub struct LedgerStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries. A missing, unreadable, or corrupt file is treated
    /// as an empty ledger — the controller then applies zero bias.
    pub fn read(&self) -> Vec<LedgerEntry> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.read_unlocked()
    }

    fn read_unlocked(&self) -> Vec<LedgerEntry> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ledger unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<LedgerFile>(&content) {
            Ok(file) => file.history,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ledger corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Record the cycle's top pick as an open entry.
    ///
    /// Skipped when an open entry for the same ticker already exists (the
    /// previous pick hasn't resolved yet). Evicts oldest-first beyond
    /// [`LEDGER_CAPACITY`]. Returns whether an entry was appended.
    pub fn record_top_pick(
        &self,
        pick: &Candidate,
        date: chrono::NaiveDate,
    ) -> Result<bool, LedgerError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut history = self.read_unlocked();

        let already_open = history
            .iter()
            .any(|e| e.ticker == pick.ticker && e.status == TradeStatus::Open);
        if already_open {
            info!(ticker = %pick.ticker, "open ledger entry exists, not re-recording");
            return Ok(false);
        }

        history.push(LedgerEntry {
            ticker: pick.ticker.clone(),
            entry_price: pick.current_price,
            goal: pick.goal,
            stop: pick.stop_loss,
            date,
            status: TradeStatus::Open,
        });

        if history.len() > LEDGER_CAPACITY {
            let excess = history.len() - LEDGER_CAPACITY;
            history.drain(..excess);
        }

        self.write_unlocked(&history)?;
        info!(ticker = %pick.ticker, entries = history.len(), "recorded top pick");
        Ok(true)
    }

    fn write_unlocked(&self, history: &[LedgerEntry]) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| LedgerError::Write {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }

        let file = LedgerFile {
            history: history.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, json).map_err(|e| LedgerError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}
