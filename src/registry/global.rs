//! Process-wide singleton accessor.
//!
//! Most programs should construct a [`ConnectionRegistry`] explicitly and
//! pass it around. For callers that need one shared client-side registry
//! per process, this module publishes a single instance through a one-time
//! initialization barrier: any thread observing the installed pointer also
//! observes a fully initialized registry. Read-only accessors treat "not
//! yet installed" as "not found".

use std::sync::{Arc, OnceLock};

use crate::connection::{ConnectionId, TransportOptions};
use crate::error::RegistryError;
use crate::registry::key::DestinationKey;
use crate::registry::map::ConnectionRegistry;

static GLOBAL: OnceLock<Arc<ConnectionRegistry>> = OnceLock::new();

/// Install the process-wide registry. Fails if one is already installed;
/// installing twice is a configuration bug, not a race to win.
pub fn install(registry: Arc<ConnectionRegistry>) -> Result<(), RegistryError> {
    GLOBAL
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)
}

/// Install the registry built by `init` unless one is already present,
/// and return the installed instance. `init` runs at most once per
/// process, even under concurrent first access.
pub fn get_or_install(
    init: impl FnOnce() -> Arc<ConnectionRegistry>,
) -> &'static Arc<ConnectionRegistry> {
    GLOBAL.get_or_init(init)
}

/// The installed registry, if any.
pub fn get() -> Option<&'static Arc<ConnectionRegistry>> {
    GLOBAL.get()
}

/// Forward to [`ConnectionRegistry::insert`] on the installed registry.
pub fn insert(
    key: &DestinationKey,
    options: &TransportOptions,
) -> Result<ConnectionId, RegistryError> {
    match get() {
        Some(registry) => registry.insert(key, options),
        None => Err(RegistryError::NotInstalled),
    }
}

/// Forward to [`ConnectionRegistry::find`]; `None` before installation.
pub fn find(key: &DestinationKey) -> Option<ConnectionId> {
    get().and_then(|registry| registry.find(key))
}

/// Forward to [`ConnectionRegistry::remove`]; a no-op before installation.
pub fn remove(key: &DestinationKey, expected_id: ConnectionId) {
    if let Some(registry) = get() {
        registry.remove(key, expected_id);
    }
}

/// Forward to [`ConnectionRegistry::list`]; empty before installation.
pub fn list() -> Vec<ConnectionId> {
    get().map(|registry| registry.list()).unwrap_or_default()
}
