//! Registry entries and their ownership mode.

use std::sync::Arc;
use std::time::Instant;

use crate::connection::Connection;

/// How the registry keeps the connection of an entry alive.
///
/// The mode is fixed at entry creation and selects the release path when
/// the entry is erased. Keeping it as a tag on the entry (instead of
/// re-checking the handle's HC flag at every call site) makes it impossible
/// to release through the wrong path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeldRef {
    /// The health-check subsystem holds the keep-alive reference; the
    /// registry holds none of its own. The connection must outlive
    /// zero-demand periods so probing can recover it.
    HealthCheck,
    /// No health checking: the registry holds one reference for the
    /// lifetime of the entry.
    Registry,
}

impl HeldRef {
    /// Pick the mode for a freshly created connection.
    pub fn for_connection(conn: &dyn Connection) -> Self {
        if conn.health_check_enabled() {
            HeldRef::HealthCheck
        } else {
            HeldRef::Registry
        }
    }

    /// Release the reference this mode stands for, exactly once.
    pub fn release(self, conn: &dyn Connection) {
        match self {
            HeldRef::HealthCheck => conn.release_health_check(),
            HeldRef::Registry => conn.release(),
        }
    }
}

/// One map value: the shared connection handle plus the registry's logical
/// demand bookkeeping for it.
#[derive(Debug)]
pub struct RegistryEntry {
    /// The connection serving this destination.
    pub conn: Arc<dyn Connection>,
    /// Ownership mode, fixed at creation.
    pub hold: HeldRef,
    /// Number of live logical holders registered through the registry.
    /// Distinct from the handle's own internal reference count.
    pub ref_count: u64,
    /// Set the instant `ref_count` reached 0; `None` while referenced.
    pub zero_ref_since: Option<Instant>,
}

impl RegistryEntry {
    /// Entry for a new connection with one logical holder.
    pub fn new(conn: Arc<dyn Connection>) -> Self {
        let hold = HeldRef::for_connection(conn.as_ref());
        Self {
            conn,
            hold,
            ref_count: 1,
            zero_ref_since: None,
        }
    }
}
