//! Domain types for SwingScan

pub mod bar;
pub mod candidate;
pub mod ledger;
pub mod series;

pub use bar::Bar;
pub use candidate::{round_cents, Candidate};
pub use ledger::{LedgerEntry, LedgerStats, TradeStatus};
pub use series::{PriceSeries, SeriesError};

/// Symbol type alias
pub type Symbol = String;
