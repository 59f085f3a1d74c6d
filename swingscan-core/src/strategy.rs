//! Strategy configuration — one parameterized pipeline, named presets.
//!
//! Earlier generations of the screener existed as separate script variants
//! that differed only in constants: base score, bonus weights, gate bands,
//! pattern window, pivot proximity, exit formula, and the adaptive bands.
//! Here each generation is a named preset over a single `StrategyConfig`.
//! Configs are serde-serializable and can be loaded from TOML.

use serde::{Deserialize, Serialize};

/// How goal and stop levels are derived from the current price.
///
/// A cycle uses exactly one exit model for every candidate it emits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitModel {
    /// Fixed percentage offsets from the current price.
    PercentOffsets { goal_pct: f64, stop_pct: f64 },

    /// ATR-multiple offsets from the current price.
    AtrMultiple { goal_mult: f64, stop_mult: f64 },
}

/// Confluence scorer parameters for the additive bonus model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreParams {
    /// Additive base every instrument starts from.
    pub base: i32,
    /// Awarded when close > MA20 > MA50 > long MA, strictly descending.
    pub trend_bonus: i32,
    /// Awarded when MA50 now exceeds MA50 `slope_lookback` bars prior.
    pub slope_bonus: i32,
    pub slope_lookback: usize,
    /// Awarded when the high-low range shrinks strictly across these
    /// nested trailing windows (longest first).
    pub contraction_bonus: i32,
    pub contraction_windows: [usize; 3],
    /// Awarded when close/benchmark outperforms its value `rs_lookback`
    /// bars back.
    pub rs_bonus: i32,
    pub rs_lookback: usize,
    /// Tiered volume bonus: `volume > hi_mult × avg` earns `volume_bonus_hi`,
    /// otherwise `volume > lo_mult × avg` earns `volume_bonus_lo`.
    pub volume_hi_mult: f64,
    pub volume_bonus_hi: i32,
    pub volume_lo_mult: f64,
    pub volume_bonus_lo: i32,
    pub volume_avg_window: usize,
    /// Awarded when RSI sits inside [zone_lo, zone_hi].
    pub rsi_zone_lo: f64,
    pub rsi_zone_hi: f64,
    pub rsi_zone_bonus: i32,
    /// Returned whenever any required input is missing or NaN.
    pub fallback: i32,
}

/// Setup gate parameters (trend / RSI band / pivot proximity).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GateParams {
    /// RSI must lie strictly inside (rsi_lo, rsi_hi).
    pub rsi_lo: f64,
    pub rsi_hi: f64,
    /// Close must be within this fraction of the trailing 20-bar high.
    pub pivot_proximity: f64,
    pub pivot_window: usize,
}

/// Pattern classifier parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PatternParams {
    /// Trailing window inspected for shape.
    pub window: usize,
    /// Range/low ratio below which the window reads as a tight flag.
    pub flag_ratio: f64,
}

/// Adaptive threshold controller bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AdaptiveBands {
    /// Resolved-trade count below which no bias is applied.
    pub min_sample: usize,
    /// Win rate (percent) below which admission tightens.
    pub low_watermark: f64,
    /// Win rate (percent) above which admission loosens.
    pub high_watermark: f64,
    /// Positive bias magnitude applied under the low watermark.
    pub tighten_by: i32,
    /// Negative bias magnitude applied over the high watermark.
    pub loosen_by: i32,
}

/// Complete strategy configuration for one scan cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyConfig {
    pub name: String,
    /// Minimum bar count an instrument needs to be evaluated at all.
    pub min_history: usize,
    /// Long moving-average window for the trend stack and market health.
    pub long_ma_window: usize,
    /// Minimum confluence score before the adaptive bias is applied.
    pub base_strictness: i32,
    pub score: ScoreParams,
    pub gate: GateParams,
    pub pattern: PatternParams,
    pub exit: ExitModel,
    pub adaptive: AdaptiveBands,
}

impl StrategyConfig {
    /// Look up a named preset.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "coil" => Some(Self::coil()),
            "atr_swing" => Some(Self::atr_swing()),
            _ => None,
        }
    }

    /// Names accepted by [`StrategyConfig::preset`].
    pub fn preset_names() -> &'static [&'static str] {
        &["classic", "coil", "atr_swing"]
    }

    /// Parse a strategy from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// First generation: generous base, percent exits, loose gates.
    pub fn classic() -> Self {
        Self {
            name: "classic".into(),
            min_history: 100,
            long_ma_window: 150,
            score: ScoreParams {
                base: 50,
                trend_bonus: 15,
                slope_bonus: 5,
                slope_lookback: 10,
                contraction_bonus: 10,
                contraction_windows: [30, 15, 7],
                rs_bonus: 10,
                rs_lookback: 20,
                volume_hi_mult: 3.0,
                volume_bonus_hi: 10,
                volume_lo_mult: 1.5,
                volume_bonus_lo: 5,
                volume_avg_window: 20,
                rsi_zone_lo: 53.0,
                rsi_zone_hi: 68.0,
                rsi_zone_bonus: 5,
                fallback: 50,
            },
            gate: GateParams {
                rsi_lo: 40.0,
                rsi_hi: 65.0,
                pivot_proximity: 0.04,
                pivot_window: 20,
            },
            pattern: PatternParams {
                window: 20,
                flag_ratio: 0.045,
            },
            exit: ExitModel::PercentOffsets {
                goal_pct: 0.10,
                stop_pct: 0.05,
            },
            base_strictness: 70,
            adaptive: AdaptiveBands {
                min_sample: 1,
                low_watermark: 45.0,
                high_watermark: 70.0,
                tighten_by: 10,
                loosen_by: 5,
            },
        }
    }

    /// Contraction-focused generation: low base, heavy trend weighting,
    /// tighter pivot proximity.
    pub fn coil() -> Self {
        Self {
            name: "coil".into(),
            min_history: 150,
            long_ma_window: 150,
            score: ScoreParams {
                base: 10,
                trend_bonus: 40,
                slope_bonus: 10,
                slope_lookback: 20,
                contraction_bonus: 15,
                contraction_windows: [40, 20, 10],
                rs_bonus: 15,
                rs_lookback: 30,
                volume_hi_mult: 2.0,
                volume_bonus_hi: 15,
                volume_lo_mult: 1.5,
                volume_bonus_lo: 8,
                volume_avg_window: 20,
                rsi_zone_lo: 55.0,
                rsi_zone_hi: 65.0,
                rsi_zone_bonus: 10,
                fallback: 0,
            },
            gate: GateParams {
                rsi_lo: 45.0,
                rsi_hi: 68.0,
                pivot_proximity: 0.03,
                pivot_window: 20,
            },
            pattern: PatternParams {
                window: 15,
                flag_ratio: 0.03,
            },
            exit: ExitModel::PercentOffsets {
                goal_pct: 0.08,
                stop_pct: 0.04,
            },
            base_strictness: 65,
            adaptive: AdaptiveBands {
                min_sample: 3,
                low_watermark: 50.0,
                high_watermark: 75.0,
                tighten_by: 15,
                loosen_by: 5,
            },
        }
    }

    /// Latest generation: full 200-bar trend template and ATR-sized exits.
    pub fn atr_swing() -> Self {
        Self {
            name: "atr_swing".into(),
            min_history: 200,
            long_ma_window: 200,
            score: ScoreParams {
                base: 40,
                trend_bonus: 25,
                slope_bonus: 8,
                slope_lookback: 20,
                contraction_bonus: 12,
                contraction_windows: [40, 20, 10],
                rs_bonus: 10,
                rs_lookback: 25,
                volume_hi_mult: 2.5,
                volume_bonus_hi: 12,
                volume_lo_mult: 1.5,
                volume_bonus_lo: 6,
                volume_avg_window: 20,
                rsi_zone_lo: 53.0,
                rsi_zone_hi: 68.0,
                rsi_zone_bonus: 8,
                fallback: 0,
            },
            gate: GateParams {
                rsi_lo: 40.0,
                rsi_hi: 65.0,
                pivot_proximity: 0.02,
                pivot_window: 20,
            },
            pattern: PatternParams {
                window: 15,
                flag_ratio: 0.035,
            },
            exit: ExitModel::AtrMultiple {
                goal_mult: 2.5,
                stop_mult: 1.5,
            },
            base_strictness: 70,
            adaptive: AdaptiveBands {
                min_sample: 3,
                low_watermark: 50.0,
                high_watermark: 70.0,
                tighten_by: 10,
                loosen_by: 5,
            },
        }
    }
}
