//! Shrinking orders to fit an exposure ceiling.

use rust_decimal::{Decimal, RoundingStrategy};
use wager_core::types::{OrderAmount, Side};

/// Decimal places kept when dividing by the payout. Truncating keeps
/// `bound * payout <= target` exact.
const AMOUNT_DP: u32 = 12;

/// Largest size or liability whose unsigned exposure stays within `target`.
///
/// Returns `None` when the price leaves no payout (`price <= 1`), where every
/// amount has zero exposure per unit and no bound exists.
pub fn max_amount_for_exposure(
    side: Side,
    amount: &OrderAmount,
    target: Decimal,
) -> Option<Decimal> {
    match (side, amount) {
        (Side::Lay, OrderAmount::LimitOnClose { .. }) => Some(target),
        (_, OrderAmount::Limit { price, .. })
        | (Side::Back, OrderAmount::LimitOnClose { price, .. }) => {
            let payout = *price - Decimal::ONE;
            if payout <= Decimal::ZERO {
                return None;
            }
            target
                .checked_div(payout)
                .map(|bound| bound.round_dp_with_strategy(AMOUNT_DP, RoundingStrategy::ToZero))
        }
    }
}

/// Lower the order's size or liability so its exposure is at most `target`.
///
/// Never increases the amount; an order already inside the target comes back
/// unchanged.
pub fn clamp_to_exposure(side: Side, amount: OrderAmount, target: Decimal) -> OrderAmount {
    match max_amount_for_exposure(side, &amount, target) {
        Some(bound) if bound < amount.amount() => amount.with_amount(bound),
        _ => amount,
    }
}
