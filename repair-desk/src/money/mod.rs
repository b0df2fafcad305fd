//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done with `Decimal`; results are converted to `f64`
//! rounded to two decimal places (half away from zero) for storage.

use crate::core::error::{DeskError, DeskResult};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::{CartLine, Product};
use shared::types::EntityId;

const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i64 = 9999;

/// Price must be finite, non-negative and at most [`MAX_PRICE`]
pub fn validate_price(price: f64, field: &'static str) -> DeskResult<()> {
    if !price.is_finite() || !(0.0..=MAX_PRICE).contains(&price) {
        return Err(DeskError::InvalidAmount { field, value: price });
    }
    Ok(())
}

/// Quantity must be in `1..=MAX_QUANTITY`
pub fn validate_quantity(quantity: i64) -> DeskResult<()> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(DeskError::InvalidQuantity(quantity));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculations
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_dp(value).to_f64().unwrap_or_default()
}

#[inline]
fn round_dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `quantity × unit_price`, rounded
pub fn line_total(quantity: i64, unit_price: f64) -> f64 {
    to_f64(Decimal::from(quantity) * to_decimal(unit_price))
}

/// Current price of product `id` within `products`
pub fn price_in(products: &[Product], id: EntityId) -> Option<f64> {
    products.iter().find(|p| p.id == id).map(|p| p.price)
}

/// Anything that references a product with a quantity
pub trait LineQuantity {
    fn product_id(&self) -> EntityId;
    fn quantity(&self) -> i64;
}

impl LineQuantity for CartLine {
    fn product_id(&self) -> EntityId {
        self.product_id
    }

    fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Subtotal, tax and grand total of a set of lines
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub grand_total: f64,
}

/// Totals of `(quantity, unit_price)` pairs
///
/// `tax = subtotal × rate` and `grand_total = subtotal + tax`, each rounded
/// to cents. The grand total is the sum of the rounded parts so the three
/// figures always add up.
pub fn totals_for<I>(items: I, tax_rate: f64) -> Totals
where
    I: IntoIterator<Item = (i64, f64)>,
{
    let subtotal = round_dp(
        items
            .into_iter()
            .map(|(quantity, price)| Decimal::from(quantity) * to_decimal(price))
            .sum::<Decimal>(),
    );
    let tax = round_dp(subtotal * to_decimal(tax_rate));
    let grand_total = subtotal + tax;

    Totals {
        subtotal: to_f64(subtotal),
        tax: to_f64(tax),
        grand_total: to_f64(grand_total),
    }
}

/// Totals of product lines priced through `price_of`
///
/// Lines whose product can't be priced contribute nothing.
pub fn compute_totals<L, F>(lines: &[L], price_of: F, tax_rate: f64) -> Totals
where
    L: LineQuantity,
    F: Fn(EntityId) -> Option<f64>,
{
    totals_for(
        lines
            .iter()
            .map(|line| (line.quantity(), price_of(line.product_id()).unwrap_or(0.0))),
        tax_rate,
    )
}

/// Σ quantity × price with no tax applied
pub fn sum_lines<L, F>(lines: &[L], price_of: F) -> f64
where
    L: LineQuantity,
    F: Fn(EntityId) -> Option<f64>,
{
    compute_totals(lines, price_of, 0.0).subtotal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: EntityId, quantity: i64) -> CartLine {
        CartLine {
            product_id,
            quantity,
        }
    }

    #[test]
    fn test_compute_totals_basic() {
        // prices: product 1 -> 10, product 2 -> 5
        let lines = vec![line(1, 2), line(2, 3)];
        let price_of = |id: EntityId| match id {
            1 => Some(10.0),
            2 => Some(5.0),
            _ => None,
        };
        let totals = compute_totals(&lines, price_of, 0.20);
        assert_eq!(totals.subtotal, 35.0);
        assert_eq!(totals.tax, 7.0);
        assert_eq!(totals.grand_total, 42.0);
    }

    #[test]
    fn test_empty_lines() {
        let lines: Vec<CartLine> = Vec::new();
        let totals = compute_totals(&lines, |_| Some(1.0), 0.20);
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_unknown_product_counts_as_zero() {
        let lines = vec![line(1, 2), line(99, 4)];
        let totals = compute_totals(&lines, |id| (id == 1).then_some(2.5), 0.0);
        assert_eq!(totals.subtotal, 5.0);
        assert_eq!(totals.grand_total, 5.0);
    }

    #[test]
    fn test_float_precision() {
        // 0.1 * 3 would be 0.30000000000000004 in f64
        let totals = totals_for([(3, 0.1)], 0.0);
        assert_eq!(totals.subtotal, 0.3);
        assert_eq!(line_total(3, 0.1), 0.3);
    }

    #[test]
    fn test_tax_rounding_half_away_from_zero() {
        // 0.25 * 0.5 = 0.125
        let totals = totals_for([(1, 0.25)], 0.5);
        assert_eq!(totals.subtotal, 0.25);
        assert_eq!(totals.tax, 0.13);
        assert_eq!(totals.grand_total, 0.38);
    }

    #[test]
    fn test_grand_total_is_sum_of_parts() {
        let totals = totals_for([(7, 19.99), (3, 4.49), (1, 1299.0)], 0.21);
        let recomputed = to_f64(to_decimal(totals.subtotal) + to_decimal(totals.tax));
        assert_eq!(totals.grand_total, recomputed);
    }

    #[test]
    fn test_sum_lines_has_no_tax() {
        let lines = vec![line(1, 1)];
        assert_eq!(sum_lines(&lines, |_| Some(999.0)), 999.0);
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0, "price").is_ok());
        assert!(validate_price(1299.0, "price").is_ok());
        assert!(validate_price(-1.0, "price").is_err());
        assert!(validate_price(f64::NAN, "price").is_err());
        assert!(validate_price(f64::INFINITY, "price").is_err());
        assert!(validate_price(MAX_PRICE, "price").is_ok());
        assert!(matches!(
            validate_price(MAX_PRICE + 1.0, "cost"),
            Err(DeskError::InvalidAmount { field: "cost", .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(matches!(
            validate_quantity(0),
            Err(DeskError::InvalidQuantity(0))
        ));
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }
}
