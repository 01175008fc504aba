//! Print the default configuration.

use anyhow::{Context, Result};
use wager_config::default_config_toml;

pub async fn run() -> Result<()> {
    let rendered = default_config_toml().context("Failed to render default configuration")?;
    print!("{}", rendered);
    Ok(())
}
