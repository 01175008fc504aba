//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use wager_controls::{ConfiguredStrategy, ControlConfig, RunnerLimits};
use wager_core::error::{WagerError, WagerResult};
use wager_core::types::StrategyLimits;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub control: ControlConfig,
    #[serde(default)]
    pub strategies: Vec<StrategySettings>,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "wager".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// A strategy's exposure limits and runner pre-check limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySettings {
    pub name: String,
    #[serde(default)]
    pub limits: StrategyLimits,
    #[serde(default)]
    pub runner: RunnerLimits,
}

impl StrategySettings {
    pub fn new(name: impl Into<String>, limits: StrategyLimits) -> Self {
        Self {
            name: name.into(),
            limits,
            runner: RunnerLimits::default(),
        }
    }

    /// Build the strategy these settings describe.
    pub fn build(&self) -> ConfiguredStrategy {
        ConfiguredStrategy::new(self.name.clone(), self.limits.clone())
            .with_runner_limits(self.runner.clone())
    }
}

impl AppConfig {
    /// Settings for the named strategy.
    pub fn strategy(&self, name: &str) -> Option<&StrategySettings> {
        self.strategies.iter().find(|s| s.name == name)
    }

    /// Reject configurations the exposure control cannot run with.
    pub fn validate(&self) -> WagerResult<()> {
        if self.control.rejection_threshold.is_sign_negative() {
            return Err(WagerError::Config(format!(
                "control.rejection_threshold must not be negative (got {})",
                self.control.rejection_threshold
            )));
        }

        let mut seen = HashSet::new();
        for strategy in &self.strategies {
            if strategy.name.trim().is_empty() {
                return Err(WagerError::Config(
                    "strategy name must not be empty".to_string(),
                ));
            }
            if !seen.insert(strategy.name.as_str()) {
                return Err(WagerError::Config(format!(
                    "duplicate strategy: {}",
                    strategy.name
                )));
            }
            strategy.limits.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wager_core::error::LimitError;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.control.rejection_threshold, dec!(1));
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_rejects_negative_caps() {
        let mut config = AppConfig::default();
        config.strategies.push(StrategySettings::new(
            "my_strategy",
            StrategyLimits {
                lay_max_selection_exposure: dec!(-1),
                ..Default::default()
            },
        ));

        match config.validate() {
            Err(WagerError::Limit(LimitError::Negative { name, .. })) => {
                assert_eq!(name, "lay_max_selection_exposure")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty_and_duplicate_names() {
        let mut config = AppConfig::default();
        config
            .strategies
            .push(StrategySettings::new(" ", StrategyLimits::default()));
        assert!(matches!(config.validate(), Err(WagerError::Config(_))));

        config.strategies[0].name = "a".to_string();
        config
            .strategies
            .push(StrategySettings::new("a", StrategyLimits::default()));
        assert!(matches!(config.validate(), Err(WagerError::Config(_))));
    }

    #[test]
    fn test_build_strategy() {
        let mut settings = StrategySettings::new("my_strategy", StrategyLimits::default());
        settings.runner.max_trade_count = Some(3);

        let strategy = settings.build();
        assert_eq!(strategy.runner_limits().max_trade_count, Some(3));
    }
}
