//! Shared id → handle table for factory implementations.
//!
//! Handles are stored as weak references: the store never keeps a
//! connection alive, it only answers "is this id still addressable".
//! Entries whose handle has been dropped are pruned lazily on access.

use std::sync::{Arc, Weak};

use dashmap::DashMap;

use crate::connection::{Connection, ConnectionId};

/// Concurrent table mapping connection ids to live handles.
#[derive(Default)]
pub struct ConnectionStore {
    inner: DashMap<ConnectionId, Weak<dyn Connection>>,
}

impl ConnectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    /// Register a handle under its own id.
    pub fn register(&self, conn: &Arc<dyn Connection>) {
        self.inner.insert(conn.id(), Arc::downgrade(conn));
    }

    /// Resolve an id to its handle, pruning the entry if the handle has
    /// already been dropped.
    pub fn resolve(&self, id: ConnectionId) -> Option<Arc<dyn Connection>> {
        match self.inner.get(&id) {
            Some(weak) => match weak.upgrade() {
                Some(conn) => Some(conn),
                None => {
                    drop(weak);
                    self.inner.remove(&id);
                    None
                }
            },
            None => None,
        }
    }

    /// Drop the entry for `id`, if any.
    pub fn deregister(&self, id: ConnectionId) {
        self.inner.remove(&id);
    }

    /// Number of entries currently registered (including dead weak refs
    /// not yet pruned).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
