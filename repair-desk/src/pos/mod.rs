//! Point-of-sale session
//!
//! Holds the POS cart and the checkout selections until the sale is
//! completed or the session is cleared. Nothing here touches stock.

use crate::cart::PosCart;
use crate::core::error::{DeskError, DeskResult, ValidationError, ValidationErrors};
use crate::money::{self, Totals};
use crate::numbering;
use crate::stores::tickets::DEFAULT_NUMBER_ATTEMPTS;
use chrono::NaiveDate;
use rand::Rng;
use shared::models::{CartLine, PaymentMethod, Product, Sale, SaleLine};
use shared::types::EntityId;
use shared::util::now_millis;

#[derive(Debug, Clone)]
pub struct PosSession {
    cart: PosCart,
    client_id: Option<EntityId>,
    ticket_id: Option<EntityId>,
    payment_method: PaymentMethod,
    note: String,
    quick_sale: bool,
    number_attempts: u32,
}

impl Default for PosSession {
    fn default() -> Self {
        Self {
            cart: PosCart::new(),
            client_id: None,
            ticket_id: None,
            payment_method: PaymentMethod::default(),
            note: String::new(),
            quick_sale: false,
            number_attempts: DEFAULT_NUMBER_ATTEMPTS,
        }
    }
}

impl PosSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_number_attempts(mut self, attempts: u32) -> Self {
        self.number_attempts = attempts;
        self
    }

    pub fn cart(&self) -> &PosCart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn add_product(&mut self, product: &Product) -> DeskResult<i64> {
        self.cart.add_product(product)
    }

    pub fn adjust_cart_quantity(
        &mut self,
        product: &Product,
        quantity: i64,
    ) -> DeskResult<Option<CartLine>> {
        self.cart.adjust_cart_quantity(product, quantity)
    }

    pub fn remove_product(&mut self, product_id: EntityId) -> DeskResult<CartLine> {
        self.cart.remove(product_id)
    }

    pub fn client_id(&self) -> Option<EntityId> {
        self.client_id
    }

    /// Selecting a client turns quick sale off
    pub fn select_client(&mut self, client_id: Option<EntityId>) {
        if client_id.is_some() {
            self.quick_sale = false;
        }
        self.client_id = client_id;
    }

    pub fn ticket_id(&self) -> Option<EntityId> {
        self.ticket_id
    }

    pub fn select_ticket(&mut self, ticket_id: Option<EntityId>) {
        self.ticket_id = ticket_id;
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn is_quick_sale(&self) -> bool {
        self.quick_sale
    }

    /// Enabling quick sale drops the selected client
    pub fn set_quick_sale(&mut self, enabled: bool) {
        self.quick_sale = enabled;
        if enabled {
            self.client_id = None;
        }
    }

    /// Back to an empty cart with default selections
    pub fn clear(&mut self) {
        let attempts = self.number_attempts;
        *self = Self::default().with_number_attempts(attempts);
    }

    pub fn totals(&self, products: &[Product], vat_rate: f64) -> Totals {
        self.cart.totals(|id| money::price_in(products, id), vat_rate)
    }

    /// Build the sale for the current cart
    ///
    /// Needs a non-empty cart and, unless this is a quick sale, a client.
    /// The session is left untouched; callers clear it once the sale is
    /// recorded.
    pub fn checkout<R, F>(
        &self,
        products: &[Product],
        vat_rate: f64,
        date: NaiveDate,
        rng: &mut R,
        is_taken: F,
    ) -> DeskResult<Sale>
    where
        R: Rng + ?Sized,
        F: Fn(&str) -> bool,
    {
        if self.cart.is_empty() {
            return Err(DeskError::EmptyCart);
        }
        if !self.quick_sale && self.client_id.is_none() {
            return Err(ValidationErrors(vec![ValidationError::MissingClient]).into());
        }

        let lines = self
            .cart
            .lines()
            .iter()
            .map(|line| {
                let product = products
                    .iter()
                    .find(|p| p.id == line.product_id)
                    .ok_or(DeskError::ProductNotFound(line.product_id))?;
                Ok(SaleLine {
                    product_id: product.id,
                    name: product.name.clone(),
                    unit_price: product.price,
                    quantity: line.quantity,
                    line_total: money::line_total(line.quantity, product.price),
                })
            })
            .collect::<DeskResult<Vec<_>>>()?;

        let totals = self.totals(products, vat_rate);
        let invoice_id = numbering::generate_invoice_id(date, self.number_attempts, rng, is_taken)?;
        let note = self.note.trim();

        Ok(Sale {
            invoice_id,
            lines,
            client_id: if self.quick_sale { None } else { self.client_id },
            ticket_id: self.ticket_id,
            subtotal: totals.subtotal,
            vat: totals.tax,
            total: totals.grand_total,
            payment_method: self.payment_method,
            note: (!note.is_empty()).then(|| note.to_string()),
            created_at: now_millis(),
        })
    }
}
