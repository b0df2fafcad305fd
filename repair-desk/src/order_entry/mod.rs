//! In-store order form
//!
//! Free-text line items with a manual price, order and delivery dates,
//! fulfillment and payment status. The draft always keeps at least one
//! row and never lets a row quantity drop below 1.

use crate::core::error::{DeskError, DeskResult, ValidationError, ValidationErrors};
use crate::money::{self, Totals};
use chrono::{Days, NaiveDate};
use shared::models::{
    FulfillmentStatus, InStoreOrderCreate, InStoreOrderItem, OrderPaymentMethod, PaymentStatus,
};
use shared::types::EntityId;

pub type RowId = u32;

/// One editable line of the form
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRow {
    pub id: RowId,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl DraftRow {
    fn blank(id: RowId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            quantity: 1,
            unit_price: 0.0,
        }
    }

    pub fn line_total(&self) -> f64 {
        money::line_total(self.quantity, self.unit_price)
    }
}

#[derive(Debug, Clone)]
pub struct OrderDraft {
    client_id: Option<EntityId>,
    order_date: NaiveDate,
    delivery_date: NaiveDate,
    order_status: FulfillmentStatus,
    payment_status: PaymentStatus,
    payment_method: OrderPaymentMethod,
    entered_amount_paid: f64,
    rows: Vec<DraftRow>,
    next_row_id: RowId,
    tax_rate: f64,
}

impl OrderDraft {
    /// Empty form dated `today`, delivery the day after
    pub fn new(today: NaiveDate, tax_rate: f64) -> Self {
        Self {
            client_id: None,
            order_date: today,
            delivery_date: today.checked_add_days(Days::new(1)).unwrap_or(today),
            order_status: FulfillmentStatus::default(),
            payment_status: PaymentStatus::default(),
            payment_method: OrderPaymentMethod::default(),
            entered_amount_paid: 0.0,
            rows: vec![DraftRow::blank(1)],
            next_row_id: 2,
            tax_rate,
        }
    }

    /// Clear the form back to a fresh draft dated `today`
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today, self.tax_rate);
    }

    // ── Rows ────────────────────────────────────────────────────────

    pub fn rows(&self) -> &[DraftRow] {
        &self.rows
    }

    pub fn add_row(&mut self) -> RowId {
        let id = self.next_row_id;
        self.next_row_id += 1;
        self.rows.push(DraftRow::blank(id));
        id
    }

    /// Remove a row unless it is the only one
    ///
    /// Returns whether the row was removed.
    pub fn remove_row(&mut self, id: RowId) -> DeskResult<bool> {
        let index = self.row_index(id)?;
        if self.rows.len() == 1 {
            return Ok(false);
        }
        self.rows.remove(index);
        Ok(true)
    }

    /// Set a row's quantity, clamping anything below 1 up to 1
    pub fn set_manual_quantity(&mut self, id: RowId, quantity: i64) -> DeskResult<i64> {
        let quantity = quantity.clamp(1, money::MAX_QUANTITY);
        self.row_mut(id)?.quantity = quantity;
        Ok(quantity)
    }

    pub fn set_name(&mut self, id: RowId, name: impl Into<String>) -> DeskResult<()> {
        self.row_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_description(&mut self, id: RowId, description: impl Into<String>) -> DeskResult<()> {
        self.row_mut(id)?.description = description.into();
        Ok(())
    }

    pub fn set_unit_price(&mut self, id: RowId, unit_price: f64) -> DeskResult<()> {
        self.row_mut(id)?.unit_price = unit_price;
        Ok(())
    }

    fn row_index(&self, id: RowId) -> DeskResult<usize> {
        self.rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(DeskError::RowNotFound(id))
    }

    fn row_mut(&mut self, id: RowId) -> DeskResult<&mut DraftRow> {
        self.rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DeskError::RowNotFound(id))
    }

    // ── Header fields ───────────────────────────────────────────────

    pub fn client_id(&self) -> Option<EntityId> {
        self.client_id
    }

    pub fn select_client(&mut self, client_id: Option<EntityId>) {
        self.client_id = client_id;
    }

    pub fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    pub fn delivery_date(&self) -> NaiveDate {
        self.delivery_date
    }

    /// Moving the order date past the delivery date drags delivery along
    pub fn set_order_date(&mut self, date: NaiveDate) {
        self.order_date = date;
        if self.delivery_date < date {
            self.delivery_date = date;
        }
    }

    /// A delivery date before the order date is clamped to the order date
    pub fn set_delivery_date(&mut self, date: NaiveDate) {
        self.delivery_date = date.max(self.order_date);
    }

    pub fn order_status(&self) -> FulfillmentStatus {
        self.order_status
    }

    pub fn set_order_status(&mut self, status: FulfillmentStatus) {
        self.order_status = status;
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
    }

    pub fn payment_method(&self) -> OrderPaymentMethod {
        self.payment_method
    }

    pub fn set_payment_method(&mut self, method: OrderPaymentMethod) {
        self.payment_method = method;
    }

    /// Amount typed into the form; only used for partial payments
    pub fn set_amount_paid(&mut self, amount: f64) {
        self.entered_amount_paid = amount;
    }

    /// Amount recorded on save for the current payment status
    pub fn amount_paid(&self) -> f64 {
        match self.payment_status {
            PaymentStatus::PartiallyPaid => self.entered_amount_paid,
            PaymentStatus::Paid => self.totals().grand_total,
            PaymentStatus::NotPaid => 0.0,
        }
    }

    // ── Totals and validation ───────────────────────────────────────

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn totals(&self) -> Totals {
        money::totals_for(
            self.rows.iter().map(|r| (r.quantity, r.unit_price)),
            self.tax_rate,
        )
    }

    /// Every issue blocking a save, in form order
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        if self.client_id.is_none() {
            errors.push(ValidationError::MissingClient);
        }
        for (index, row) in self.rows.iter().enumerate() {
            let row_number = index + 1;
            if row.name.trim().is_empty() {
                errors.push(ValidationError::InvalidItemName { row: row_number });
            }
            if !row.unit_price.is_finite() || row.unit_price <= 0.0 {
                errors.push(ValidationError::NonPositivePrice { row: row_number });
            } else if row.unit_price > money::MAX_PRICE {
                errors.push(ValidationError::PriceTooHigh { row: row_number });
            }
            if row.quantity < 1 {
                errors.push(ValidationError::NonPositiveQuantity { row: row_number });
            }
        }
        if self.payment_status == PaymentStatus::PartiallyPaid
            && !(self.entered_amount_paid.is_finite() && self.entered_amount_paid >= 0.0)
        {
            errors.push(ValidationError::NegativeAmountPaid);
        }
        ValidationErrors(errors).into_result()
    }

    /// Validated snapshot ready to be recorded
    pub fn to_create(&self) -> DeskResult<InStoreOrderCreate> {
        self.validate()?;
        let client_id = self.client_id.ok_or_else(|| {
            DeskError::from(ValidationErrors(vec![ValidationError::MissingClient]))
        })?;
        let totals = self.totals();

        Ok(InStoreOrderCreate {
            client_id,
            order_date: self.order_date,
            delivery_date: self.delivery_date,
            order_status: self.order_status,
            payment_status: self.payment_status,
            payment_method: self.payment_method,
            amount_paid: money::to_f64(money::to_decimal(self.amount_paid())),
            items: self
                .rows
                .iter()
                .map(|r| InStoreOrderItem {
                    name: r.name.trim().to_string(),
                    description: r.description.clone(),
                    quantity: r.quantity,
                    unit_price: r.unit_price,
                    line_total: r.line_total(),
                })
                .collect(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            grand_total: totals.grand_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn filled() -> OrderDraft {
        let mut draft = OrderDraft::new(day(10), 0.20);
        draft.select_client(Some(1));
        let first = draft.rows()[0].id;
        draft.set_name(first, "Screen protector").unwrap();
        draft.set_unit_price(first, 10.0).unwrap();
        draft.set_manual_quantity(first, 2).unwrap();

        let second = draft.add_row();
        draft.set_name(second, "Case").unwrap();
        draft.set_unit_price(second, 5.0).unwrap();
        draft.set_manual_quantity(second, 3).unwrap();
        draft
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = OrderDraft::new(day(10), 0.20);
        assert_eq!(draft.rows().len(), 1);
        assert_eq!(draft.rows()[0].quantity, 1);
        assert_eq!(draft.delivery_date(), day(11));
        assert_eq!(draft.payment_status(), PaymentStatus::NotPaid);
        assert_eq!(draft.order_status(), FulfillmentStatus::Pending);
    }

    #[test]
    fn test_quantity_clamps_to_one() {
        let mut draft = OrderDraft::new(day(10), 0.20);
        let row = draft.rows()[0].id;
        assert_eq!(draft.set_manual_quantity(row, 0).unwrap(), 1);
        assert_eq!(draft.set_manual_quantity(row, -4).unwrap(), 1);
        assert_eq!(draft.rows().len(), 1);
        assert!(matches!(
            draft.set_manual_quantity(99, 2),
            Err(DeskError::RowNotFound(99))
        ));
    }

    #[test]
    fn test_last_row_is_kept() {
        let mut draft = OrderDraft::new(day(10), 0.20);
        let first = draft.rows()[0].id;
        assert!(!draft.remove_row(first).unwrap());

        let second = draft.add_row();
        assert!(draft.remove_row(first).unwrap());
        assert_eq!(draft.rows()[0].id, second);
    }

    #[test]
    fn test_totals() {
        let draft = filled();
        let totals = draft.totals();
        assert_eq!(totals.subtotal, 35.0);
        assert_eq!(totals.tax, 7.0);
        assert_eq!(totals.grand_total, 42.0);
        assert_eq!(draft.rows()[1].line_total(), 15.0);
    }

    #[test]
    fn test_delivery_date_clamped() {
        let mut draft = OrderDraft::new(day(10), 0.20);
        draft.set_delivery_date(day(5));
        assert_eq!(draft.delivery_date(), day(10));

        draft.set_delivery_date(day(14));
        draft.set_order_date(day(20));
        assert_eq!(draft.delivery_date(), day(20));
    }

    #[test]
    fn test_amount_paid_follows_status() {
        let mut draft = filled();
        draft.set_amount_paid(12.5);
        assert_eq!(draft.amount_paid(), 0.0);

        draft.set_payment_status(PaymentStatus::PartiallyPaid);
        assert_eq!(draft.amount_paid(), 12.5);

        draft.set_payment_status(PaymentStatus::Paid);
        assert_eq!(draft.amount_paid(), 42.0);
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let mut draft = OrderDraft::new(day(10), 0.20);
        draft.add_row();
        draft.set_payment_status(PaymentStatus::PartiallyPaid);
        draft.set_amount_paid(-1.0);

        let errors = draft.validate().unwrap_err();
        assert!(errors.contains(&ValidationError::MissingClient));
        assert!(errors.contains(&ValidationError::InvalidItemName { row: 1 }));
        assert!(errors.contains(&ValidationError::NonPositivePrice { row: 2 }));
        assert!(errors.contains(&ValidationError::NegativeAmountPaid));
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_price_above_maximum_is_rejected() {
        let mut draft = filled();
        let second = draft.rows()[1].id;
        draft.set_unit_price(second, 1e30).unwrap();

        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.0, vec![ValidationError::PriceTooHigh { row: 2 }]);
        assert!(matches!(draft.to_create(), Err(DeskError::Validation(_))));

        draft.set_unit_price(second, money::MAX_PRICE).unwrap();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_to_create() {
        let mut draft = filled();
        draft.set_payment_status(PaymentStatus::Paid);
        draft.set_payment_method(OrderPaymentMethod::DebitCard);

        let create = draft.to_create().unwrap();
        assert_eq!(create.client_id, 1);
        assert_eq!(create.items.len(), 2);
        assert_eq!(create.items[0].line_total, 20.0);
        assert_eq!(create.grand_total, 42.0);
        assert_eq!(create.amount_paid, 42.0);
        assert_eq!(create.payment_method, OrderPaymentMethod::DebitCard);
    }

    #[test]
    fn test_to_create_rejects_invalid() {
        let draft = OrderDraft::new(day(10), 0.20);
        assert!(matches!(draft.to_create(), Err(DeskError::Validation(_))));
    }

    #[test]
    fn test_reset() {
        let mut draft = filled();
        draft.reset(day(12));
        assert_eq!(draft.rows().len(), 1);
        assert_eq!(draft.client_id(), None);
        assert_eq!(draft.order_date(), day(12));
        assert_eq!(draft.tax_rate(), 0.20);
    }
}
