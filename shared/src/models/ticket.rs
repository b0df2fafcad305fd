//! Repair Ticket Model

use crate::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Status filter for the ticket list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(TicketStatus),
}

impl StatusFilter {
    pub fn accepts(&self, status: TicketStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(s) => *s == status,
        }
    }
}

/// Repair ticket entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: EntityId,
    /// Human-readable number, e.g. "jun4821"
    pub ticket_number: String,
    pub client_id: EntityId,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub tasks: Vec<String>,
    pub issue: Option<String>,
    pub status: TicketStatus,
    /// Quoted repair cost in currency unit
    pub cost: f64,
    pub technician_id: EntityId,
    pub passcode: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create ticket payload (number, id and timestamps are assigned by the store)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketCreate {
    pub client_id: EntityId,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub tasks: Vec<String>,
    pub issue: Option<String>,
    #[serde(default)]
    pub status: TicketStatus,
    pub cost: f64,
    pub technician_id: EntityId,
    pub passcode: Option<String>,
}

/// Update ticket payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketUpdate {
    pub client_id: Option<EntityId>,
    pub device_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub tasks: Option<Vec<String>>,
    pub issue: Option<String>,
    pub status: Option<TicketStatus>,
    pub cost: Option<f64>,
    pub technician_id: Option<EntityId>,
    pub passcode: Option<String>,
}

impl Ticket {
    /// Merge a partial update; `updated_at` is bumped by the caller's clock.
    pub fn apply(&mut self, update: TicketUpdate, now: Timestamp) {
        if let Some(v) = update.client_id {
            self.client_id = v;
        }
        if let Some(v) = update.device_type {
            self.device_type = v;
        }
        if let Some(v) = update.brand {
            self.brand = v;
        }
        if let Some(v) = update.model {
            self.model = v;
        }
        if let Some(v) = update.tasks {
            self.tasks = v;
        }
        if let Some(v) = update.issue {
            self.issue = Some(v);
        }
        if let Some(v) = update.status {
            self.status = v;
        }
        if let Some(v) = update.cost {
            self.cost = v;
        }
        if let Some(v) = update.technician_id {
            self.technician_id = v;
        }
        if let Some(v) = update.passcode {
            self.passcode = Some(v);
        }
        self.updated_at = now;
    }
}
