//! Data boundary — historical bars and the ticker universe.

pub mod ingest;
pub mod provider;
pub mod universe;
pub mod yahoo;

pub use ingest::ingest_series;
pub use provider::{BarProvider, DataError, RawBar, UniverseProvider};
pub use universe::{WikipediaUniverse, FALLBACK_TICKERS};
pub use yahoo::YahooBars;
