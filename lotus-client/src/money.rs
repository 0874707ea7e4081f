//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary values cross the wire as `f64` and are converted to
//! `Decimal` for every calculation, then back for storage/serialization.

use rust_decimal::prelude::*;
use shared::models::DiscountType;

use crate::cart::{CartLine, SelectionExtras};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a monetary value to 2 decimal places, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Apply a promotional discount to a unit base price
///
/// Percentage: `base - base * value / 100`. Fixed: `base - value`.
/// The result is rounded half-up to 2 decimal places and floored at
/// zero: a fixed discount larger than the base, or a percentage above
/// 100, yields a free unit rather than a negative price.
pub fn apply_discount(base_price: Decimal, discount_type: DiscountType, discount_value: f64) -> Decimal {
    let discount = match discount_type {
        DiscountType::Percentage => base_price * to_decimal(discount_value) / Decimal::ONE_HUNDRED,
        DiscountType::Fixed => to_decimal(discount_value),
    };

    round_money((base_price - discount).max(Decimal::ZERO))
}

/// Line total for a single cart line (unit price * quantity)
pub fn line_total(line: &CartLine) -> Decimal {
    round_money(to_decimal(line.unit_price) * Decimal::from(line.quantity))
}

/// Payable amount for the whole cart
///
/// Sum of line totals plus each selected extra's flat price. Pure
/// function of the cart state; callers recompute it after every
/// mutation rather than adjusting a running total.
pub fn cart_total(lines: &[CartLine], extras: &SelectionExtras) -> Decimal {
    let mut total: Decimal = lines.iter().map(line_total).sum();

    if let Some(package) = &extras.package {
        total += to_decimal(package.price);
    }
    if let Some(membership) = &extras.membership {
        total += to_decimal(membership.price);
    }

    round_money(total)
}

/// Format a monetary value with exactly two decimal places for display
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}
