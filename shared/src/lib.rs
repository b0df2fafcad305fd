//! Shared types for the repair desk
//!
//! Data models, unified error types, change notification payloads and
//! small utilities used by the desk crate and its callers.

pub mod error;
pub mod message;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use message::{SyncAction, SyncPayload, SyncResource};
