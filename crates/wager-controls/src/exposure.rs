//! Exposure arithmetic for single orders.
//!
//! Exposure is the profit (positive) or loss (negative) on a selection if it
//! wins. With `E = price - 1`:
//!
//! | side | order          | unsigned     | signed        |
//! |------|----------------|--------------|---------------|
//! | back | limit          | size * E     | +size * E     |
//! | lay  | limit          | size * E     | -size * E     |
//! | back | limit on close | liability * E| +liability * E|
//! | lay  | limit on close | liability    | -liability    |

use rust_decimal::Decimal;
use wager_core::types::{OrderAmount, Side};

/// Raw amount risked: size or liability, never scaled by price.
pub fn order_stake(amount: &OrderAmount) -> Decimal {
    amount.amount()
}

/// Magnitude of the order's exposure if the selection wins.
pub fn order_exposure(side: Side, amount: &OrderAmount) -> Decimal {
    match (side, amount) {
        (_, OrderAmount::Limit { size, price }) => *size * (*price - Decimal::ONE),
        (Side::Back, OrderAmount::LimitOnClose { liability, price }) => {
            *liability * (*price - Decimal::ONE)
        }
        (Side::Lay, OrderAmount::LimitOnClose { liability, .. }) => *liability,
    }
}

/// Order exposure signed by side: positive for back, negative for lay.
pub fn signed_order_exposure(side: Side, amount: &OrderAmount) -> Decimal {
    side.sign() * order_exposure(side, amount)
}

/// Selection exposure magnitude if the order were fully matched.
pub fn potential_selection_exposure(
    matched_profit_if_win: Decimal,
    side: Side,
    amount: &OrderAmount,
) -> Decimal {
    (matched_profit_if_win + signed_order_exposure(side, amount)).abs()
}
