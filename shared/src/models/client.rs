//! Client Model

use crate::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// Client entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: Timestamp,
}

/// Create client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Update client payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Client {
    /// Merge a partial update into this record. `id` and `created_at` never change.
    pub fn apply(&mut self, update: ClientUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
    }

    /// Case-insensitive substring match on name, email or phone
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self.email.to_lowercase().contains(&q)
            || self.phone.to_lowercase().contains(&q)
    }
}
