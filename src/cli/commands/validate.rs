//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use wager_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Rejection threshold: {}", config.control.rejection_threshold);
    println!("Strategies: {}", config.strategies.len());
    for strategy in &config.strategies {
        let limits = &strategy.limits;
        println!();
        println!("  {}", strategy.name);
        println!("    Max stake: {}", limits.max_stake);
        println!(
            "    Max order exposure: back {} / lay {}",
            limits.back_max_order_exposure, limits.lay_max_order_exposure
        );
        println!(
            "    Max selection exposure: back {} / lay {}",
            limits.back_max_selection_exposure, limits.lay_max_selection_exposure
        );
        if let Some(settings) = &limits.exposure_settings {
            let mut classifications: Vec<_> = settings.classifications.keys().collect();
            classifications.sort();
            println!("    Classifications: {:?}", classifications);
            if let Some(fallback) = &settings.fallback {
                println!("    Fallback classification: {}", fallback);
            }
        }
    }

    Ok(())
}
