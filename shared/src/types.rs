//! Common types for the shared crate

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Entity identifier (unique within its store)
pub type EntityId = i64;
