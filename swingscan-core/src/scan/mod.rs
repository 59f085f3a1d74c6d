//! The scoring / classification / adaptation engine.
//!
//! Everything in this module is a pure function of its inputs: no clock, no
//! randomness, no I/O. The runner computes shared cycle state (market health,
//! threshold) once, then evaluates tickers independently.

pub mod gate;
pub mod indicator_set;
pub mod pattern;
pub mod score;
pub mod threshold;

pub use gate::{near_pivot, passes_setup_gate};
pub use indicator_set::IndicatorSet;
pub use pattern::{classify_pattern, PatternLabel};
pub use score::confluence_score;
pub use threshold::{effective_threshold, threshold_bias};
