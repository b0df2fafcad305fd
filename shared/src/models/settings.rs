//! Ticket Settings Model
//!
//! Lookup lists used by the ticket form. Device types, brands and tasks are
//! plain strings edited by value; models carry an id and reference their
//! brand by name.

use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// Device model entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceModel {
    pub id: EntityId,
    pub name: String,
    /// Brand name this model belongs to
    pub brand_id: String,
}

/// Ticket form lookup lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketSettings {
    pub device_types: Vec<String>,
    pub brands: Vec<String>,
    pub models: Vec<DeviceModel>,
    pub tasks: Vec<String>,
}

impl TicketSettings {
    /// Models belonging to a brand
    pub fn models_for_brand<'a>(&'a self, brand: &'a str) -> impl Iterator<Item = &'a DeviceModel> {
        self.models.iter().filter(move |m| m.brand_id == brand)
    }
}
