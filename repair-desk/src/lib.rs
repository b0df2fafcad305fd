//! Repair Desk - device repair and retail shop back office
//!
//! In-memory stores for clients, repair tickets, products, orders and
//! point-of-sale transactions, with decimal-precise cart and order totals.
//!
//! # Module layout
//!
//! ```text
//! repair-desk/src/
//! ├── core/         # DeskState, configuration, errors
//! ├── stores/       # Entity stores (clients, tickets, products, orders, sales)
//! ├── money/        # Decimal totals
//! ├── cart/         # Cart merge rules, POS cart
//! ├── pos/          # Point-of-sale session
//! ├── order_entry/  # In-store order form
//! ├── message/      # Change notifications
//! ├── utils/        # Logger, validation helpers
//! ├── numbering.rs  # Ticket numbers, invoice ids
//! └── fixtures.rs   # Demo records
//! ```

pub mod cart;
pub mod core;
pub mod fixtures;
pub mod message;
pub mod money;
pub mod numbering;
pub mod order_entry;
pub mod pos;
pub mod stores;
pub mod utils;

// Re-exports
pub use cart::PosCart;
pub use core::{DeskConfig, DeskError, DeskResult, DeskState, ValidationError, ValidationErrors};
pub use message::Notifier;
pub use money::Totals;
pub use order_entry::OrderDraft;
pub use pos::PosSession;
pub use utils::init_logger;
