//! Collaborators the controls report to and read from.

use crate::types::{Market, Order, OrderViolation, SelectionExposures};

/// Source of matched exposure for a selection (usually the market blotter).
pub trait ExposureCalculator {
    fn exposures(&self, strategy: &str, market: &Market, order: &Order) -> SelectionExposures;
}

/// Receives the reason an order was rejected.
///
/// This is the only channel for rejections; the owner of the order turns it
/// into an order lifecycle failure.
pub trait ErrorSink {
    fn on_error(&mut self, order: &Order, message: &str);
}

impl ErrorSink for Vec<OrderViolation> {
    fn on_error(&mut self, order: &Order, message: &str) {
        self.push(OrderViolation::new(order, message));
    }
}
