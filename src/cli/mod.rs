//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use wager_core::types::{OrderPackageType, Side};

#[derive(Parser)]
#[command(name = "wager")]
#[command(author, version, about = "Pre-trade exposure controls for exchange betting strategies")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Also write JSON logs to this file
    #[arg(long, env = "WAGER_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an order through the exposure control
    Check(CheckArgs),
    /// Validate configuration
    ValidateConfig,
    /// Print the default configuration
    InitConfig,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Strategy placing the order
    #[arg(short, long, default_value = "my_strategy")]
    pub strategy: String,

    /// Market id
    #[arg(short, long, default_value = "1.0")]
    pub market: String,

    /// Selection id
    #[arg(long, default_value = "1")]
    pub selection: u64,

    /// Order side (back, lay)
    #[arg(long, default_value = "back")]
    pub side: Side,

    /// Limit order size
    #[arg(
        long,
        conflicts_with = "liability",
        required_unless_present_any = ["liability", "order_file"]
    )]
    pub size: Option<Decimal>,

    /// Limit-on-close liability
    #[arg(long)]
    pub liability: Option<Decimal>,

    /// Order price
    #[arg(short, long, required_unless_present = "order_file")]
    pub price: Option<Decimal>,

    /// Market classification used for classification limits
    #[arg(long)]
    pub classification: Option<String>,

    /// Signed matched profit if the selection wins
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub matched_profit_if_win: Decimal,

    /// How the order is sent (place, replace, update, cancel)
    #[arg(long, default_value = "place")]
    pub package_type: OrderPackageType,

    /// Read the order from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["size", "liability", "price"])]
    pub order_file: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}
