//! Scan configuration — TOML-loadable settings for one scan cycle.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swingscan_core::strategy::StrategyConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown strategy preset '{0}'")]
    UnknownPreset(String),
}

/// SMTP settings for the notification sink.
///
/// The password is resolved from the environment at send time, not stored
/// in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub address: String,
    /// Environment variable holding the SMTP password.
    pub password_env: String,
}

impl EmailSettings {
    pub fn default_gmail(address: impl Into<String>) -> Self {
        Self {
            smtp_host: "smtp.gmail.com".into(),
            smtp_port: 587,
            address: address.into(),
            password_env: "SWINGSCAN_SMTP_PASSWORD".into(),
        }
    }
}

/// Complete configuration for a scan cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// Named strategy preset (see `StrategyConfig::preset_names`).
    pub preset: String,

    /// Benchmark symbol for market health and relative strength.
    pub benchmark: String,

    /// Calendar days of history requested per ticker.
    pub lookback_days: u32,

    /// Snapshot output path.
    pub output_path: PathBuf,

    /// Ledger file path.
    pub ledger_path: PathBuf,

    /// Optional email notification settings.
    pub email: Option<EmailSettings>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            preset: "classic".into(),
            benchmark: "SPY".into(),
            lookback_days: 365,
            output_path: PathBuf::from("public/signals.json"),
            ledger_path: PathBuf::from("public/trade_history.json"),
            email: None,
        }
    }
}

impl ScanConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Resolve the configured preset into a full strategy.
    pub fn strategy(&self) -> Result<StrategyConfig, ConfigError> {
        StrategyConfig::preset(&self.preset)
            .ok_or_else(|| ConfigError::UnknownPreset(self.preset.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolves_to_classic() {
        let config = ScanConfig::default();
        let strategy = config.strategy().unwrap();
        assert_eq!(strategy.name, "classic");
        assert_eq!(config.benchmark, "SPY");
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let config = ScanConfig {
            preset: "does_not_exist".into(),
            ..ScanConfig::default()
        };
        assert!(matches!(
            config.strategy(),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn toml_roundtrip_with_email() {
        let config = ScanConfig {
            email: Some(EmailSettings::default_gmail("ops@example.com")),
            ..ScanConfig::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let back: ScanConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn parse_minimal_file() {
        let toml_str = r#"
            preset = "atr_swing"
            benchmark = "SPY"
            lookback_days = 400
            output_path = "out/signals.json"
            ledger_path = "out/history.json"
        "#;
        let config: ScanConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.preset, "atr_swing");
        assert!(config.email.is_none());
    }
}
