//! Registry error taxonomy.
//!
//! Two classes of failure reach callers:
//! - configuration errors (double install of the global registry), reported
//!   synchronously and recoverable by fixing the setup;
//! - resource-creation failures inside `insert`, which indicate exhausted
//!   local resources or a broken factory contract. These are marked fatal:
//!   the registry's bookkeeping cannot be trusted afterwards, so the
//!   top-level process should decide whether to abort.
//!
//! Transient remote failures are never surfaced here; they live inside the
//! connection handle's failed/health-check state. Lookup misses are likewise
//! not errors (`find` returns `Option`).

use std::net::SocketAddr;

use thiserror::Error;

use crate::connection::{ConnectionId, CreateError};

/// Errors produced by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The factory could not create a connection to the destination.
    #[error("failed to create connection to {addr}: {source}")]
    CreateFailed {
        addr: SocketAddr,
        #[source]
        source: CreateError,
    },

    /// The factory returned an id that does not resolve to a handle.
    #[error("created connection {id} cannot be resolved")]
    Unresolvable { id: ConnectionId },

    /// A freshly created connection is already failed and has no health
    /// checking to recover it. The factory violated its contract: a new,
    /// unmonitored connection must start healthy.
    #[error("created connection {id} is failed without health checking")]
    FailedWithoutHealthCheck { id: ConnectionId },

    /// The process-wide registry was installed twice.
    #[error("global connection registry is already installed")]
    AlreadyInstalled,

    /// A mutating operation was forwarded to the process-wide registry
    /// before it was installed.
    #[error("global connection registry is not installed")]
    NotInstalled,
}

impl RegistryError {
    /// True for failures the registry cannot recover from locally. The
    /// caller owns the abort decision; the registry itself never exits.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RegistryError::CreateFailed { .. }
                | RegistryError::Unresolvable { .. }
                | RegistryError::FailedWithoutHealthCheck { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatality_classification() {
        let err = RegistryError::Unresolvable {
            id: ConnectionId::INVALID,
        };
        assert!(err.is_fatal());
        assert!(!RegistryError::AlreadyInstalled.is_fatal());
        assert!(!RegistryError::NotInstalled.is_fatal());
    }
}
