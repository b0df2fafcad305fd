//! Change notification plumbing
//!
//! Every store owns a [`Notifier`]. Notifiers built from the same sender
//! share one channel, so a single [`broadcast::Receiver`] sees changes
//! from all stores. `send` and `try_recv` are synchronous; no runtime is
//! needed.

use serde::Serialize;
use shared::message::{SyncAction, SyncPayload, SyncResource};
use std::collections::HashMap;
use tokio::sync::broadcast;

/// Buffer used by stores constructed on their own
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Per-resource version counters
///
/// A resource that was never bumped reports version 0.
#[derive(Debug, Default, Clone)]
pub struct ResourceVersions {
    versions: HashMap<SyncResource, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the version of `resource` and return the new value
    pub fn increment(&mut self, resource: SyncResource) -> u64 {
        let entry = self.versions.entry(resource).or_insert(0);
        *entry += 1;
        *entry
    }

    pub fn get(&self, resource: SyncResource) -> u64 {
        self.versions.get(&resource).copied().unwrap_or(0)
    }
}

/// Publishes [`SyncPayload`]s for one store
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<SyncPayload>,
    versions: ResourceVersions,
}

impl Notifier {
    pub fn new(tx: broadcast::Sender<SyncPayload>) -> Self {
        Self {
            tx,
            versions: ResourceVersions::new(),
        }
    }

    /// Notifier with a private channel
    pub fn standalone() -> Self {
        let (tx, _) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self::new(tx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.tx.subscribe()
    }

    pub fn version(&self, resource: SyncResource) -> u64 {
        self.versions.get(resource)
    }

    /// Broadcast a change carrying the affected record
    pub fn publish<T: Serialize>(
        &mut self,
        resource: SyncResource,
        action: SyncAction,
        id: impl ToString,
        data: &T,
    ) -> u64 {
        let version = self.versions.increment(resource);
        let payload = SyncPayload::new(resource, version, action, id.to_string()).with_data(data);
        self.send(payload);
        version
    }

    /// Broadcast a change with no record attached (removals, resets)
    pub fn publish_bare(
        &mut self,
        resource: SyncResource,
        action: SyncAction,
        id: impl ToString,
    ) -> u64 {
        let version = self.versions.increment(resource);
        self.send(SyncPayload::new(resource, version, action, id.to_string()));
        version
    }

    fn send(&self, payload: SyncPayload) {
        // No receivers is fine
        if self.tx.send(payload).is_err() {
            tracing::trace!("No change subscribers");
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::standalone()
    }
}
