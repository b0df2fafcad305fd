//! Order Model
//!
//! Catalog orders (cart lines referencing products) and in-store orders
//! (free-form item rows entered at the counter).

use crate::types::{EntityId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A (product, quantity) pair within a cart or order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: EntityId,
    /// Always >= 1
    pub quantity: i64,
}

/// Catalog order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

/// Catalog order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    pub items: Vec<CartLine>,
    /// Sum of quantity x product price at creation time, never recomputed
    pub total: f64,
    pub status: OrderStatus,
    pub client_id: EntityId,
    pub created_at: Timestamp,
}

/// In-store order workflow status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    #[default]
    Pending,
    Processing,
    ReadyForPickup,
    Completed,
    Cancelled,
}

/// In-store order payment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    #[default]
    NotPaid,
    PartiallyPaid,
}

/// Payment method offered by the in-store order form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderPaymentMethod {
    #[default]
    Cash,
    CreditCard,
    DebitCard,
    BankTransfer,
}

/// One free-form row of an in-store order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InStoreOrderItem {
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// In-store order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InStoreOrder {
    pub id: EntityId,
    pub client_id: EntityId,
    pub order_date: NaiveDate,
    /// Never before `order_date`
    pub delivery_date: NaiveDate,
    pub order_status: FulfillmentStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: OrderPaymentMethod,
    pub amount_paid: f64,
    pub items: Vec<InStoreOrderItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub grand_total: f64,
    pub created_at: Timestamp,
}

/// In-store order as submitted by the form, before the store assigns an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InStoreOrderCreate {
    pub client_id: EntityId,
    pub order_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub order_status: FulfillmentStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: OrderPaymentMethod,
    pub amount_paid: f64,
    pub items: Vec<InStoreOrderItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub grand_total: f64,
}
