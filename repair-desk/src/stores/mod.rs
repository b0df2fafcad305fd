//! In-memory entity stores
//!
//! Each store owns its collection and a [`Notifier`](crate::message::Notifier).
//! Mutators take `&mut self` and publish exactly one change notification
//! on success; failed mutations publish nothing.

pub mod clients;
pub mod orders;
pub mod products;
pub mod sales;
pub mod ticket_settings;
pub mod tickets;

pub use clients::ClientsStore;
pub use orders::OrdersStore;
pub use products::ProductsStore;
pub use sales::SalesStore;
pub use tickets::TicketsStore;

use shared::types::EntityId;

/// First id after the highest id in `ids` (1 for an empty collection)
pub(crate) fn next_id_after<I>(ids: I) -> EntityId
where
    I: IntoIterator<Item = EntityId>,
{
    ids.into_iter().max().map_or(1, |max| max + 1)
}

/// Case-insensitive substring match; an empty query matches everything
pub(crate) fn contains_ci(haystack: &str, query: &str) -> bool {
    query.is_empty() || haystack.to_lowercase().contains(&query.to_lowercase())
}
