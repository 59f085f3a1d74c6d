//! SwingScan Runner — scan-cycle orchestration.
//!
//! This crate builds on `swingscan-core` to provide:
//! - Scan configuration (TOML) with preset resolution
//! - The screening pipeline: gate → score → classify → rank → record
//! - The trade ledger store (JSON, bounded history, crash-tolerant reads)
//! - The output snapshot writer (the cycle's only fatal error path)
//! - Best-effort email notification

pub mod config;
pub mod ledger;
pub mod notify;
pub mod pipeline;
pub mod snapshot;

pub use config::{ConfigError, EmailSettings, ScanConfig};
pub use ledger::{LedgerError, LedgerStore, LEDGER_CAPACITY};
pub use notify::{compose_summary, EmailNotifier, Notifier, NoopNotifier};
pub use pipeline::{run_cycle, CycleError, CycleOutcome};
pub use snapshot::{write_snapshot, ScanSnapshot, SnapshotError};
