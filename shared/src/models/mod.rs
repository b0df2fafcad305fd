//! Data models
//!
//! All IDs are `i64`, monetary values are `f64` in currency units
//! (computed with `Decimal`, stored rounded to 2 dp) and timestamps are
//! Unix millis.

pub mod client;
pub mod order;
pub mod product;
pub mod sale;
pub mod settings;
pub mod ticket;

// Re-exports
pub use client::*;
pub use order::*;
pub use product::*;
pub use sale::*;
pub use settings::*;
pub use ticket::*;
