//! Candidate — one instrument's evaluation result for a scan cycle.

use crate::scan::PatternLabel;
use serde::{Deserialize, Serialize};

/// A scored trade setup emitted by the screening pipeline.
///
/// Created fresh each cycle and never mutated afterwards. Field names
/// serialize in camelCase to match the snapshot consumed by the web front
/// end (`currentPrice`, `buyAt`, `stopLoss`, ...). Every numeric field is a
/// primitive, so the JSON encoder can only ever emit native numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub ticker: String,
    pub score: i32,
    pub pattern: PatternLabel,
    pub current_price: f64,
    pub buy_at: f64,
    pub goal: f64,
    pub stop_loss: f64,
    pub rsi: f64,
}

/// Round a price to cents for presentation.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Candidate {
        Candidate {
            ticker: "NVDA".into(),
            score: 85,
            pattern: PatternLabel::Flag,
            current_price: 110.25,
            buy_at: 112.0,
            goal: 121.28,
            stop_loss: 104.74,
            rsi: 61.3,
        }
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["currentPrice"], 110.25);
        assert_eq!(json["buyAt"], 112.0);
        assert_eq!(json["stopLoss"], 104.74);
        assert_eq!(json["score"], 85);
        assert!(json["current_price"].is_null());
    }

    #[test]
    fn round_cents_to_two_places() {
        assert_eq!(round_cents(10.006), 10.01);
        assert_eq!(round_cents(10.004), 10.0);
        assert_eq!(round_cents(121.275_000_1), 121.28);
    }
}
