//! Check command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};
use wager_config::{load_config, AppConfig, StrategySettings};
use wager_controls::{ControlDecision, ExposureControl, ExposureSnapshot};
use wager_core::types::{
    Market, Order, OrderAmount, OrderViolation, OverLimitSelections, SelectionExposures,
    StrategyLimits,
};

use crate::cli::CheckArgs;

#[derive(Serialize)]
struct CheckReport<'a> {
    submitted: &'a Order,
    #[serde(flatten)]
    decision: &'a ControlDecision,
    violations: &'a [OrderViolation],
    strategies_over_limit: &'a OverLimitSelections,
}

pub async fn run(args: CheckArgs, config_path: &Path) -> Result<()> {
    let config = if config_path.exists() {
        load_config(config_path)
            .with_context(|| format!("Failed to load configuration from {:?}", config_path))?
    } else {
        warn!("Configuration {:?} not found, using defaults", config_path);
        AppConfig::default()
    };
    config.validate().context("Invalid configuration")?;

    let order = match &args.order_file {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read order file {:?}", path))?;
            serde_json::from_str::<Order>(&raw).context("Failed to parse order")?
        }
        None => order_from_args(&args)?,
    };

    let settings = match config.strategy(&order.strategy_name) {
        Some(settings) => settings.clone(),
        None => {
            warn!(
                "Strategy {} not configured, using default limits",
                order.strategy_name
            );
            StrategySettings::new(order.strategy_name.clone(), StrategyLimits::default())
        }
    };
    let mut strategy = settings.build();

    let mut snapshot = ExposureSnapshot::new();
    snapshot.set(
        order.strategy_name.clone(),
        order.market_id.clone(),
        order.selection_id,
        SelectionExposures::matched(args.matched_profit_if_win),
    );
    let control = ExposureControl::new(config.control.clone(), snapshot);

    let mut market = Market::new(order.market_id.clone());
    market.classification = args.classification.clone();
    let mut violations: Vec<OrderViolation> = Vec::new();

    info!(
        "Checking {} {} for {} on {}/{}",
        order.side, order.amount, order.strategy_name, order.market_id, order.selection_id
    );
    let decision = control.validate(
        &order,
        args.package_type,
        &mut strategy,
        &mut market,
        &mut violations,
    );

    // Output results
    match args.output.as_str() {
        "json" => {
            let report = CheckReport {
                submitted: &order,
                decision: &decision,
                violations: &violations,
                strategies_over_limit: market.context.strategies_over_limit(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => println!("{}", summary(&order, &decision)),
    }

    Ok(())
}

fn order_from_args(args: &CheckArgs) -> Result<Order> {
    let price = args.price.context("--price is required")?;
    let amount = match (args.size, args.liability) {
        (Some(size), None) => OrderAmount::limit(size, price),
        (None, Some(liability)) => OrderAmount::limit_on_close(liability, price),
        _ => anyhow::bail!("Provide exactly one of --size or --liability"),
    };
    Ok(Order::new(
        args.strategy.clone(),
        args.market.as_str(),
        args.selection,
        args.side,
        amount,
    ))
}

fn summary(order: &Order, decision: &ControlDecision) -> String {
    let mut lines = vec![format!(
        "Order {} {} for {} on {}/{}",
        order.side, order.amount, order.strategy_name, order.market_id, order.selection_id
    )];
    match decision {
        ControlDecision::Approved { .. } => lines.push("Decision: APPROVED".to_string()),
        ControlDecision::Modified { order, adjustments } => {
            lines.push("Decision: MODIFIED".to_string());
            for adjustment in adjustments {
                lines.push(format!(
                    "  {}: {} -> {}",
                    adjustment.stage, adjustment.from, adjustment.to
                ));
            }
            lines.push(format!("Final: {} {}", order.side, order.amount));
        }
        ControlDecision::Rejected { stage, reason } => {
            lines.push(format!("Decision: REJECTED ({})", stage));
            lines.push(format!("Reason: {}", reason));
        }
    }
    lines.join("\n")
}
