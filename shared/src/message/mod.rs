//! Change notification payloads
//!
//! When a store mutates one of its records it broadcasts a [`SyncPayload`]
//! so every interested view can re-read the store.
//!
//! # Example
//! - `resource`: `Ticket`
//! - `version`: 42
//! - `action`: `Updated`
//! - `id`: "17"

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource a change notification refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncResource {
    Client,
    Ticket,
    TicketSettings,
    Product,
    Order,
    Cart,
    InStoreOrder,
    Sale,
}

impl SyncResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Ticket => "ticket",
            Self::TicketSettings => "ticket_settings",
            Self::Product => "product",
            Self::Order => "order",
            Self::Cart => "cart",
            Self::InStoreOrder => "in_store_order",
            Self::Sale => "sale",
        }
    }
}

impl fmt::Display for SyncResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    Created,
    Updated,
    Deleted,
    /// Whole collection emptied (order-entry cart cleared)
    Reset,
}

/// Change notification (store -> subscribers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Resource type
    pub resource: SyncResource,
    /// Per-store version, incremented on every mutation
    pub version: u64,
    /// Change type
    pub action: SyncAction,
    /// Affected entity id (product id for cart lines, list value for settings)
    pub id: String,
    /// Affected record, absent for deletions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl SyncPayload {
    pub fn new(
        resource: SyncResource,
        version: u64,
        action: SyncAction,
        id: impl Into<String>,
    ) -> Self {
        Self {
            resource,
            version,
            action,
            id: id.into(),
            data: None,
        }
    }

    /// Attach the serialized record; serialization failures leave `data` empty
    pub fn with_data<T: Serialize>(mut self, data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => self.data = Some(value),
            Err(e) => {
                tracing::warn!(resource = %self.resource, error = %e, "Failed to serialize sync data")
            }
        }
        self
    }
}
