//! Cart line bookkeeping
//!
//! Two merge rules exist. The order-entry cart replaces a line with the
//! new quantity ([`replace_line`]); the POS cart bumps an existing line by
//! one ([`PosCart::add_product`]). Both keep at most one line per product.

use crate::core::error::{DeskError, DeskResult};
use crate::money::{self, Totals};
use serde::{Deserialize, Serialize};
use shared::models::{CartLine, Product};
use shared::types::EntityId;

/// Drop any line for `line.product_id` and append `line`
pub fn replace_line(lines: &mut Vec<CartLine>, line: CartLine) {
    lines.retain(|l| l.product_id != line.product_id);
    lines.push(line);
}

/// Point-of-sale cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PosCart {
    lines: Vec<CartLine>,
}

impl PosCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn quantity_of(&self, product_id: EntityId) -> Option<i64> {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
    }

    /// Add one unit of `product`
    ///
    /// Returns the line's new quantity. Out-of-stock products are refused,
    /// as is a bump past the available stock.
    pub fn add_product(&mut self, product: &Product) -> DeskResult<i64> {
        if !product.in_stock() {
            tracing::warn!(product_id = product.id, "Refusing out-of-stock product");
            return Err(DeskError::OutOfStock(product.id));
        }

        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => {
                let requested = line.quantity + 1;
                if requested > product.stock {
                    return Err(DeskError::InsufficientStock {
                        product_id: product.id,
                        requested,
                        available: product.stock,
                    });
                }
                line.quantity = requested;
                Ok(requested)
            }
            None => {
                self.lines.push(CartLine {
                    product_id: product.id,
                    quantity: 1,
                });
                Ok(1)
            }
        }
    }

    /// Set the quantity of `product`'s line
    ///
    /// A quantity of zero or less removes the line. Returns the remaining
    /// line, if any.
    pub fn adjust_cart_quantity(
        &mut self,
        product: &Product,
        quantity: i64,
    ) -> DeskResult<Option<CartLine>> {
        let index = self
            .lines
            .iter()
            .position(|l| l.product_id == product.id)
            .ok_or(DeskError::CartLineNotFound(product.id))?;

        if quantity <= 0 {
            self.lines.remove(index);
            return Ok(None);
        }
        if quantity > product.stock {
            return Err(DeskError::InsufficientStock {
                product_id: product.id,
                requested: quantity,
                available: product.stock,
            });
        }

        let line = &mut self.lines[index];
        line.quantity = quantity;
        Ok(Some(*line))
    }

    pub fn remove(&mut self, product_id: EntityId) -> DeskResult<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or(DeskError::CartLineNotFound(product_id))?;
        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn totals<F>(&self, price_of: F, tax_rate: f64) -> Totals
    where
        F: Fn(EntityId) -> Option<f64>,
    {
        money::compute_totals(&self.lines, price_of, tax_rate)
    }
}
