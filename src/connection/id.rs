//! Process-unique connection identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global atomic counter for connection IDs. Starts at 1 so that 0 can
/// serve as the invalid/wildcard sentinel.
/// Relaxed ordering is sufficient since we only need uniqueness, not
/// synchronization.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Sentinel meaning "no connection" or, in `remove`, "no id
    /// expectation".
    pub const INVALID: ConnectionId = ConnectionId(0);

    /// Generate a new unique connection ID.
    pub fn next() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// True for any id other than the invalid sentinel.
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}
