//! Order types and structures.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::market::{MarketId, SelectionId};

/// Order side (back or lay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Profits if the selection wins
    Back,
    /// Profits if the selection loses
    Lay,
}

impl Side {
    /// Get the sign of the profit-if-win contribution (+1 for back, -1 for lay).
    pub fn sign(&self) -> Decimal {
        match self {
            Side::Back => Decimal::ONE,
            Side::Lay => -Decimal::ONE,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Back => write!(f, "BACK"),
            Side::Lay => write!(f, "LAY"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BACK" => Ok(Side::Back),
            "LAY" => Ok(Side::Lay),
            other => Err(format!("unknown side: {}", other)),
        }
    }
}

/// Size fields of an order.
///
/// A limit order risks `size` at `price`. A limit-on-close order states its
/// `liability` directly; for a lay that is already the loss if the selection
/// wins, for a back the price still scales the payout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderAmount {
    /// Bounded-price order
    Limit { size: Decimal, price: Decimal },
    /// Liability order
    LimitOnClose { liability: Decimal, price: Decimal },
}

impl OrderAmount {
    /// Create a limit amount.
    pub fn limit(size: Decimal, price: Decimal) -> Self {
        OrderAmount::Limit { size, price }
    }

    /// Create a limit-on-close amount.
    pub fn limit_on_close(liability: Decimal, price: Decimal) -> Self {
        OrderAmount::LimitOnClose { liability, price }
    }

    /// The order price.
    pub fn price(&self) -> Decimal {
        match self {
            OrderAmount::Limit { price, .. } | OrderAmount::LimitOnClose { price, .. } => *price,
        }
    }

    /// The adjustable field: `size` for limit orders, `liability` otherwise.
    pub fn amount(&self) -> Decimal {
        match self {
            OrderAmount::Limit { size, .. } => *size,
            OrderAmount::LimitOnClose { liability, .. } => *liability,
        }
    }

    /// Copy with the adjustable field replaced, price untouched.
    pub fn with_amount(&self, amount: Decimal) -> Self {
        match *self {
            OrderAmount::Limit { price, .. } => OrderAmount::Limit { size: amount, price },
            OrderAmount::LimitOnClose { price, .. } => OrderAmount::LimitOnClose {
                liability: amount,
                price,
            },
        }
    }

    /// Name of the adjustable field.
    pub fn amount_field(&self) -> &'static str {
        match self {
            OrderAmount::Limit { .. } => "size",
            OrderAmount::LimitOnClose { .. } => "liability",
        }
    }
}

impl std::fmt::Display for OrderAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderAmount::Limit { size, price } => write!(f, "LIMIT size={} @ {}", size, price),
            OrderAmount::LimitOnClose { liability, price } => {
                write!(f, "LIMIT_ON_CLOSE liability={} @ {}", liability, price)
            }
        }
    }
}

/// How an order is being sent to the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderPackageType {
    #[default]
    Place,
    Cancel,
    Update,
    Replace,
}

impl OrderPackageType {
    /// Whether this package can add exposure to a selection.
    pub fn adds_exposure(&self) -> bool {
        matches!(self, OrderPackageType::Place | OrderPackageType::Replace)
    }
}

impl std::str::FromStr for OrderPackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PLACE" => Ok(OrderPackageType::Place),
            "CANCEL" => Ok(OrderPackageType::Cancel),
            "UPDATE" => Ok(OrderPackageType::Update),
            "REPLACE" => Ok(OrderPackageType::Replace),
            other => Err(format!("unknown package type: {}", other)),
        }
    }
}

/// An order about to be sent to a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Market traded
    pub market_id: MarketId,
    /// Selection traded
    pub selection_id: SelectionId,
    /// Back or lay
    pub side: Side,
    /// Size fields
    pub amount: OrderAmount,
    /// Name of the strategy that owns the order
    pub strategy_name: String,
    /// Reason supplied by the strategy when its own pre-check fails
    #[serde(default)]
    pub violation_msg: Option<String>,
    /// When the order was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new order.
    pub fn new(
        strategy_name: impl Into<String>,
        market_id: impl Into<MarketId>,
        selection_id: impl Into<SelectionId>,
        side: Side,
        amount: OrderAmount,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            market_id: market_id.into(),
            selection_id: selection_id.into(),
            side,
            amount,
            strategy_name: strategy_name.into(),
            violation_msg: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a violation message.
    pub fn with_violation_msg(mut self, msg: impl Into<String>) -> Self {
        self.violation_msg = Some(msg.into());
        self
    }

    /// Copy of this order carrying different size fields.
    pub fn with_amount(&self, amount: OrderAmount) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// The order price.
    pub fn price(&self) -> Decimal {
        self.amount.price()
    }
}

/// A rejection reported for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderViolation {
    pub order_id: Uuid,
    pub market_id: MarketId,
    pub selection_id: SelectionId,
    pub strategy_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl OrderViolation {
    pub fn new(order: &Order, message: impl Into<String>) -> Self {
        Self {
            order_id: order.id,
            market_id: order.market_id.clone(),
            selection_id: order.selection_id,
            strategy_name: order.strategy_name.clone(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
