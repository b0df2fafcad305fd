//! Point-of-sale Sale Model

use crate::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// Payment method offered at the POS
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
    Digital,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [Self::Cash, Self::Card, Self::Transfer, Self::Digital];

    /// Display name shown on the checkout panel
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Credit Card",
            Self::Transfer => "Bank Transfer",
            Self::Digital => "Digital Payment",
        }
    }
}

/// Sold line with the product snapshot taken at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: EntityId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

/// Completed POS sale (invoice)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// "INV-yyMMdd-NNNN"
    pub invoice_id: String,
    pub lines: Vec<SaleLine>,
    /// None for quick sales
    pub client_id: Option<EntityId>,
    pub ticket_id: Option<EntityId>,
    pub subtotal: f64,
    pub vat: f64,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub note: Option<String>,
    pub created_at: Timestamp,
}
