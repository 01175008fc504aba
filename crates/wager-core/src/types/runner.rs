//! Per (strategy, selection) trading state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::market::SelectionId;

/// State a strategy keeps about one selection it trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerContext {
    pub selection_id: SelectionId,
    /// Whether any order has been placed on this selection
    pub invested: bool,
    /// Trades placed since the last reset
    pub trades: Vec<Uuid>,
    /// Trades that still have unmatched or unsettled orders
    pub live_trades: Vec<Uuid>,
    pub last_placed: Option<DateTime<Utc>>,
    pub last_reset: Option<DateTime<Utc>>,
}

impl RunnerContext {
    pub fn new(selection_id: SelectionId) -> Self {
        Self {
            selection_id,
            invested: false,
            trades: Vec::new(),
            live_trades: Vec::new(),
            last_placed: None,
            last_reset: None,
        }
    }

    /// Record a placed trade.
    pub fn place(&mut self, trade_id: Uuid, at: DateTime<Utc>) {
        self.invested = true;
        self.last_placed = Some(at);
        if !self.trades.contains(&trade_id) {
            self.trades.push(trade_id);
        }
        if !self.live_trades.contains(&trade_id) {
            self.live_trades.push(trade_id);
        }
    }

    /// Mark a trade as complete.
    pub fn complete_trade(&mut self, trade_id: Uuid) {
        self.live_trades.retain(|id| *id != trade_id);
    }

    /// Forget placed trades (live trades are kept).
    pub fn reset(&mut self, at: DateTime<Utc>) {
        self.invested = false;
        self.trades.clear();
        self.last_reset = Some(at);
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn live_trade_count(&self) -> usize {
        self.live_trades.len()
    }

    /// Time since the last placement, if any.
    pub fn placed_elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.last_placed.map(|placed| now - placed)
    }

    /// Whether the selection can take another order.
    ///
    /// A limit of `None` is unlimited. `place_reset_seconds` enforces a pause
    /// between consecutive placements.
    pub fn executable(
        &self,
        max_trade_count: Option<usize>,
        max_live_trade_count: Option<usize>,
        place_reset_seconds: u64,
        now: DateTime<Utc>,
    ) -> bool {
        if let Some(max) = max_trade_count {
            if self.trade_count() >= max {
                return false;
            }
        }
        if let Some(max) = max_live_trade_count {
            if self.live_trade_count() >= max {
                return false;
            }
        }
        if place_reset_seconds > 0 {
            if let Some(elapsed) = self.placed_elapsed(now) {
                if elapsed < Duration::seconds(place_reset_seconds as i64) {
                    return false;
                }
            }
        }
        true
    }
}
