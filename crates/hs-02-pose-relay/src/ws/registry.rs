//! Subscription registry: who is connected and what each consumer wants.
//!
//! Records are keyed by [`ConnectionId`] in a `BTreeMap`, so snapshots come
//! out in connect order. The lock is only held to copy records out; delivery
//! always happens on a snapshot.

use axum::extract::ws::Message;
use parking_lot::RwLock;
use shared_types::SubscriptionMask;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::ConnectionId;

/// Outbound frame queue of one connection, drained by its writer task.
pub type Outbox = mpsc::Sender<Message>;

/// One registered consumer.
#[derive(Debug, Clone)]
pub struct ConsumerRecord {
    pub id: ConnectionId,
    pub outbox: Outbox,
    pub mask: SubscriptionMask,
}

/// Registry of consumers that completed a handshake.
#[derive(Debug)]
pub struct SubscriptionRegistry {
    consumers: RwLock<BTreeMap<ConnectionId, ConsumerRecord>>,
    /// Counter for generating connection IDs
    id_counter: AtomicU64,
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self {
            consumers: RwLock::new(BTreeMap::new()),
            id_counter: AtomicU64::new(1),
        }
    }

    /// Allocate an id for a new connection.
    pub fn next_connection_id(&self) -> ConnectionId {
        ConnectionId::new(self.id_counter.fetch_add(1, Ordering::SeqCst))
    }

    /// Register a consumer, or replace the mask of an existing one.
    ///
    /// Returns `true` when the connection was not registered before.
    pub fn register(&self, id: ConnectionId, outbox: Outbox, mask: SubscriptionMask) -> bool {
        let mut consumers = self.consumers.write();
        match consumers.get_mut(&id) {
            Some(record) => {
                record.mask = mask;
                debug!(connection_id = %id, mask = %mask, "Updated subscription");
                false
            }
            None => {
                consumers.insert(id, ConsumerRecord { id, outbox, mask });
                debug!(connection_id = %id, mask = %mask, "Registered consumer");
                true
            }
        }
    }

    /// Replace the mask of a registered consumer. Unknown ids are a no-op.
    pub fn update(&self, id: ConnectionId, mask: SubscriptionMask) -> bool {
        match self.consumers.write().get_mut(&id) {
            Some(record) => {
                record.mask = mask;
                true
            }
            None => false,
        }
    }

    /// Remove a consumer. Unknown ids are a no-op.
    pub fn unregister(&self, id: ConnectionId) -> bool {
        let removed = self.consumers.write().remove(&id).is_some();
        if removed {
            debug!(connection_id = %id, "Unregistered consumer");
        }
        removed
    }

    /// Copy of every record, ordered by connect time.
    pub fn snapshot(&self) -> Vec<ConsumerRecord> {
        self.consumers.read().values().cloned().collect()
    }

    pub fn mask(&self, id: ConnectionId) -> Option<SubscriptionMask> {
        self.consumers.read().get(&id).map(|record| record.mask)
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.consumers.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.consumers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.read().is_empty()
    }
}
