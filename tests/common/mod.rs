//! Shared mock collaborators for registry integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use conn_registry::config::settings::RegistrySettings;
use conn_registry::config::RegistryConfig;
use conn_registry::connection::{
    Connection, ConnectionFactory, ConnectionId, ConnectionStore, CreateError, TransportOptions,
};
use conn_registry::registry::{ConnectionRegistry, RegistryOptions};

/// An in-memory connection handle with observable release bookkeeping.
#[derive(Debug)]
pub struct MockConnection {
    id: ConnectionId,
    remote: SocketAddr,
    pub failed: AtomicBool,
    hc_enabled: bool,
    pooled: Mutex<Vec<ConnectionId>>,
    /// Number of `release` calls observed.
    pub released: AtomicU32,
    /// Number of `release_health_check` calls observed.
    pub hc_released: AtomicU32,
    /// Number of `release_if_idle` calls observed.
    pub idle_checks: AtomicU32,
}

impl MockConnection {
    pub fn new(remote: SocketAddr, hc_enabled: bool) -> Self {
        Self {
            id: ConnectionId::next(),
            remote,
            failed: AtomicBool::new(false),
            hc_enabled,
            pooled: Mutex::new(Vec::new()),
            released: AtomicU32::new(0),
            hc_released: AtomicU32::new(0),
            idle_checks: AtomicU32::new(0),
        }
    }

    pub fn set_pooled(&self, ids: Vec<ConnectionId>) {
        *self.pooled.lock().unwrap() = ids;
    }
}

impl Connection for MockConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    fn is_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    fn health_check_enabled(&self) -> bool {
        self.hc_enabled
    }

    fn pooled_connections(&self) -> Vec<ConnectionId> {
        self.pooled.lock().unwrap().clone()
    }

    fn release(&self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }

    fn release_health_check(&self) {
        self.hc_released.fetch_add(1, Ordering::SeqCst);
    }

    fn release_if_idle(&self, _idle: Duration) {
        self.idle_checks.fetch_add(1, Ordering::SeqCst);
    }
}

/// A factory producing [`MockConnection`]s, with toggles for the failure
/// paths and a shared id → handle store for resolution.
pub struct MockFactory {
    store: ConnectionStore,
    handles: Mutex<Vec<Arc<MockConnection>>>,
    /// Number of successful `create` calls.
    pub created: AtomicU32,
    /// New connections report health checking enabled.
    pub next_hc: AtomicBool,
    /// New connections start in the failed state.
    pub next_failed: AtomicBool,
    /// `create` itself returns an error.
    pub fail_create: AtomicBool,
    /// Options the factory saw on the most recent `create`.
    pub last_options: Mutex<Option<TransportOptions>>,
}

impl MockFactory {
    pub fn new() -> Self {
        Self {
            store: ConnectionStore::new(),
            handles: Mutex::new(Vec::new()),
            created: AtomicU32::new(0),
            next_hc: AtomicBool::new(false),
            next_failed: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            last_options: Mutex::new(None),
        }
    }

    /// The most recently created main connection.
    pub fn last_handle(&self) -> Arc<MockConnection> {
        Arc::clone(
            self.handles
                .lock()
                .unwrap()
                .last()
                .expect("no connection created yet"),
        )
    }

    /// Attach `count` pooled sub-connections to `main`, registered in the
    /// store so the reaper can resolve them.
    pub fn add_pooled(&self, main: &Arc<MockConnection>, count: usize) -> Vec<Arc<MockConnection>> {
        let mut subs = Vec::with_capacity(count);
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let sub = Arc::new(MockConnection::new(main.remote_addr(), false));
            let as_dyn: Arc<dyn Connection> = Arc::clone(&sub) as Arc<dyn Connection>;
            self.store.register(&as_dyn);
            ids.push(sub.id());
            subs.push(Arc::clone(&sub));
            self.handles.lock().unwrap().push(sub);
        }
        main.set_pooled(ids);
        subs
    }
}

impl Default for MockFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionFactory for MockFactory {
    fn create(
        &self,
        addr: SocketAddr,
        options: &TransportOptions,
    ) -> Result<ConnectionId, CreateError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(CreateError::new("simulated resource exhaustion"));
        }
        *self.last_options.lock().unwrap() = Some(options.clone());
        let conn = Arc::new(MockConnection::new(addr, self.next_hc.load(Ordering::SeqCst)));
        if self.next_failed.load(Ordering::SeqCst) {
            conn.failed.store(true, Ordering::SeqCst);
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        let id = conn.id();
        let as_dyn: Arc<dyn Connection> = Arc::clone(&conn) as Arc<dyn Connection>;
        self.store.register(&as_dyn);
        self.handles.lock().unwrap().push(conn);
        Ok(id)
    }

    fn resolve(&self, id: ConnectionId) -> Option<Arc<dyn Connection>> {
        self.store.resolve(id)
    }
}

/// Registry wired to a fresh mock factory and the given configuration.
pub fn registry_with_config(config: RegistryConfig) -> (Arc<ConnectionRegistry>, Arc<MockFactory>) {
    let factory = Arc::new(MockFactory::new());
    let registry = Arc::new(ConnectionRegistry::new(RegistryOptions {
        factory: Arc::clone(&factory) as Arc<dyn ConnectionFactory>,
        settings: Arc::new(RegistrySettings::from_config(config)),
    }));
    (registry, factory)
}

/// Configuration with idle reaping and defer-close both off.
pub fn immediate_config() -> RegistryConfig {
    let mut config = RegistryConfig::default();
    config.idle_timeout_secs = 0;
    config.defer_close_secs = 0;
    config
}

pub fn destination(port: u16) -> conn_registry::DestinationKey {
    conn_registry::DestinationKey::new(format!("127.0.0.1:{port}").parse().unwrap())
}
