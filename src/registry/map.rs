//! The connection registry map.
//!
//! # Responsibilities
//! - Own the destination → entry map and its locking discipline
//! - Share one connection per destination among concurrent callers
//! - Replace permanently failed, unmonitored connections on insert
//! - Track logical demand per entry and defer or perform removal
//!
//! # Design Decisions
//! - One mutex serializes every map operation, held across the whole
//!   insert including factory calls: connection creation is rare relative
//!   to lookups, and holding the lock rules out duplicate-create races
//! - Handles are released outside the lock where possible
//! - The reaper drives removal exclusively through the same public
//!   operations, so forced and caller-initiated removals cannot erase a
//!   key twice

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::config::settings::RegistrySettings;
use crate::connection::{Connection, ConnectionFactory, ConnectionId, TransportOptions};
use crate::error::RegistryError;
use crate::observability::metrics;
use crate::registry::entry::RegistryEntry;
use crate::registry::key::DestinationKey;

/// Construction options for a registry.
pub struct RegistryOptions {
    /// Creates and resolves connection handles. Required; the type system
    /// replaces the runtime "creator must be set" check of older designs.
    pub factory: Arc<dyn ConnectionFactory>,
    /// Reloadable configuration scalars shared with the config watcher.
    pub settings: Arc<RegistrySettings>,
}

/// Process-wide map from destination keys to shared connections.
pub struct ConnectionRegistry {
    map: Mutex<HashMap<DestinationKey, RegistryEntry>>,
    factory: Arc<dyn ConnectionFactory>,
    settings: Arc<RegistrySettings>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new(options: RegistryOptions) -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
            factory: options.factory,
            settings: options.settings,
        }
    }

    /// Reloadable settings this registry observes.
    pub fn settings(&self) -> &Arc<RegistrySettings> {
        &self.settings
    }

    /// Get a connection for `key`, creating one if needed.
    ///
    /// The fast path shares the existing entry and bumps its logical
    /// reference count. An existing connection that has failed permanently
    /// and has no health checking can never recover, so it is released and
    /// replaced by a fresh one. Fatal errors (see
    /// [`RegistryError::is_fatal`]) mean the factory could not produce a
    /// healthy handle; bookkeeping is left untouched in that case.
    pub fn insert(
        &self,
        key: &DestinationKey,
        options: &TransportOptions,
    ) -> Result<ConnectionId, RegistryError> {
        let mut map = self.map.lock();

        if let Some(entry) = map.get_mut(key) {
            if !entry.conn.is_failed() || entry.conn.health_check_enabled() {
                entry.ref_count += 1;
                metrics::record_insert("hit");
                return Ok(entry.conn.id());
            }
        }
        // Either absent, or present but failed without health checking.
        // Erase-and-recreate instead of overwriting in place keeps the
        // error branches below from having to undo a half-updated entry.
        if let Some(stale) = map.remove(key) {
            tracing::info!(
                destination = %key,
                id = %stale.conn.id(),
                "Replacing permanently failed connection"
            );
            stale.hold.release(stale.conn.as_ref());
            metrics::record_insert("replace");
        } else {
            metrics::record_insert("create");
        }

        let mut effective = options.clone();
        if effective.health_check.enabled {
            effective.health_check.interval_secs = self.settings.health_check_interval_secs();
        }

        let id = self
            .factory
            .create(key.addr(), &effective)
            .map_err(|source| RegistryError::CreateFailed {
                addr: key.addr(),
                source,
            })?;
        let conn = self
            .factory
            .resolve(id)
            .ok_or(RegistryError::Unresolvable { id })?;
        if conn.is_failed() && !conn.health_check_enabled() {
            // A new connection with nothing to recover it must start
            // healthy; anything else is a broken factory.
            return Err(RegistryError::FailedWithoutHealthCheck { id });
        }

        tracing::debug!(destination = %key, id = %id, "Created connection");
        map.insert(key.clone(), RegistryEntry::new(conn));
        self.expose_size(map.len());
        Ok(id)
    }

    /// Drop one logical reference on `key`'s entry.
    ///
    /// The decrement only happens when `expected_id` is
    /// [`ConnectionId::INVALID`] (no expectation) or matches the entry's
    /// current connection; a mismatch means the caller's connection was
    /// already replaced and its reference accounted elsewhere. When the
    /// count reaches zero the entry is erased immediately, or kept for the
    /// configured defer-close window. Removing an absent key is a no-op:
    /// callers may race with an earlier cleanup.
    pub fn remove(&self, key: &DestinationKey, expected_id: ConnectionId) {
        self.remove_internal(key, expected_id, false);
    }

    fn remove_internal(&self, key: &DestinationKey, expected_id: ConnectionId, forced: bool) {
        let mut map = self.map.lock();
        let defer_close = self.settings.defer_close();
        {
            let Some(entry) = map.get_mut(key) else {
                return;
            };
            if !forced
                && (expected_id == ConnectionId::INVALID || expected_id == entry.conn.id())
            {
                entry.ref_count = entry.ref_count.saturating_sub(1);
            }
            if entry.ref_count > 0 {
                return;
            }
            if !forced && !defer_close.is_zero() {
                // Soft removal: start the grace countdown and leave the
                // entry for the reaper.
                entry.zero_ref_since = Some(Instant::now());
                tracing::trace!(destination = %key, "Entry unreferenced, deferring close");
                return;
            }
        }
        let Some(entry) = map.remove(key) else {
            return;
        };
        self.expose_size(map.len());
        drop(map);

        tracing::debug!(
            destination = %key,
            id = %entry.conn.id(),
            forced,
            "Removing connection entry"
        );
        // The creation hold first, then whichever reference the ownership
        // mode stands for.
        entry.conn.release();
        entry.hold.release(entry.conn.as_ref());
        if forced {
            metrics::record_reaped();
        }
    }

    /// Read-only lookup of the connection currently serving `key`.
    pub fn find(&self, key: &DestinationKey) -> Option<ConnectionId> {
        self.map.lock().get(key).map(|entry| entry.conn.id())
    }

    /// Current logical reference count for `key`, for monitoring and
    /// tests. `None` if the key is absent.
    pub fn ref_count(&self, key: &DestinationKey) -> Option<u64> {
        self.map.lock().get(key).map(|entry| entry.ref_count)
    }

    /// Snapshot of the ids of all main connections.
    pub fn list(&self) -> Vec<ConnectionId> {
        self.map
            .lock()
            .values()
            .map(|entry| entry.conn.id())
            .collect()
    }

    /// Snapshot of the remote endpoints of all main connections.
    pub fn list_remotes(&self) -> Vec<std::net::SocketAddr> {
        self.map
            .lock()
            .values()
            .map(|entry| entry.conn.remote_addr())
            .collect()
    }

    /// Keys whose entry has been unreferenced for at least `grace`.
    ///
    /// One-shot snapshot taken under the lock; the reaper consumes it
    /// immediately.
    pub fn list_orphans(&self, grace: Duration) -> Vec<DestinationKey> {
        let now = Instant::now();
        self.map
            .lock()
            .iter()
            .filter(|(_, entry)| {
                entry.ref_count == 0
                    && entry
                        .zero_ref_since
                        .is_some_and(|since| now.duration_since(since) >= grace)
            })
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Resolve a connection id through the factory. Used by the reaper to
    /// reach pooled sub-connections; returns failed handles as well.
    pub fn resolve(&self, id: ConnectionId) -> Option<Arc<dyn Connection>> {
        self.factory.resolve(id)
    }

    /// Number of entries currently in the map.
    pub fn len(&self) -> usize {
        self.map.lock().len()
    }

    /// True if no destinations are registered.
    pub fn is_empty(&self) -> bool {
        self.map.lock().is_empty()
    }

    /// One synchronous reaper cycle: release idle pooled sub-connections,
    /// then erase entries past the defer-close grace window.
    ///
    /// The background [`Reaper`](crate::registry::Reaper) calls this every
    /// second; tests call it directly to drive reaping without the timer.
    pub fn run_reap_cycle(&self) {
        // Settings may be reloaded at any time; read once per cycle.
        if let Some(idle_timeout) = self.settings.idle_timeout() {
            let skip = usize::from(self.settings.reserve_one_idle());
            for main_id in self.list() {
                let Some(main) = self.resolve(main_id) else {
                    continue;
                };
                for pooled_id in main.pooled_connections().into_iter().skip(skip) {
                    if let Some(pooled) = self.resolve(pooled_id) {
                        pooled.release_if_idle(idle_timeout);
                    }
                }
            }
        }

        // With defer-close disabled this erases freshly orphaned entries on
        // the next cycle at the latest; `remove` usually beats it to them.
        let grace = self.settings.defer_close();
        for key in self.list_orphans(grace) {
            self.remove_internal(&key, ConnectionId::INVALID, true);
        }
    }

    fn expose_size(&self, len: usize) {
        if self.settings.expose_registry() {
            metrics::record_registry_size(len);
        }
    }
}

impl Drop for ConnectionRegistry {
    fn drop(&mut self) {
        let map = self.map.get_mut();
        let mut leaked = 0usize;
        for (key, entry) in map.iter() {
            if (!entry.conn.is_failed() || entry.conn.health_check_enabled())
                && entry.ref_count != 0
            {
                leaked += 1;
                tracing::error!(
                    destination = %key,
                    id = %entry.conn.id(),
                    ref_count = entry.ref_count,
                    "Connection still referenced at registry teardown"
                );
            }
        }
        if leaked > 0 {
            tracing::error!(count = leaked, "Registry destroyed with live references");
        }
    }
}
