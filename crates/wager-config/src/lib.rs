//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, LoggingConfig, StrategySettings};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables prefixed `WAGER__` override file values, e.g.
/// `WAGER__CONTROL__REJECTION_THRESHOLD=2`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("WAGER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// The default configuration rendered as TOML.
pub fn default_config_toml() -> Result<String, toml::ser::Error> {
    let mut config = AppConfig::default();
    config.strategies.push(StrategySettings::new(
        "my_strategy",
        wager_core::types::StrategyLimits::default(),
    ));
    toml::to_string_pretty(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_toml() {
        let path = write_config(
            "wager-config-load",
            r#"
[control]
rejection_threshold = 2

[[strategies]]
name = "my_strategy"

[strategies.limits]
max_stake = 100
back_max_order_exposure = 400
lay_max_selection_exposure = 550

[strategies.runner]
max_live_trade_count = 1
"#,
        );

        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.control.rejection_threshold, dec!(2));
        let strategy = config.strategy("my_strategy").unwrap();
        assert_eq!(strategy.limits.max_stake, dec!(100));
        assert_eq!(strategy.limits.back_max_order_exposure, dec!(400));
        assert_eq!(strategy.limits.lay_max_order_exposure, dec!(20));
        assert_eq!(strategy.limits.lay_max_selection_exposure, dec!(550));
        assert_eq!(strategy.runner.max_live_trade_count, Some(1));
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_toml_parses() {
        let rendered = default_config_toml().unwrap();
        let path = write_config("wager-config-default", &rendered);
        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.strategies.len(), 1);
        assert_eq!(config.strategies[0].limits.max_stake, dec!(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bundled_config_loads_classifications() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        let config = load_config(&path).unwrap();
        assert!(config.validate().is_ok());

        let tiered = config.strategy("tiered").unwrap();
        let settings = tiered.limits.exposure_settings.as_ref().unwrap();
        let metro = settings.lookup(Some("METRO")).unwrap();
        assert_eq!(metro.back.max_order_exposure, dec!(400));
        let fallback = settings.lookup(Some("PROVINCIAL")).unwrap();
        assert_eq!(fallback.lay.max_selection_exposure, dec!(25));
    }
}
