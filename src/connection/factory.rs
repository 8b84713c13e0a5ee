//! Connection creation.
//!
//! # Responsibilities
//! - Define the pluggable factory the registry creates connections through
//! - Carry transport options (TLS, RDMA, health-check policy) opaquely
//!   from the caller to the factory
//!
//! # Design Decisions
//! - `create` returns an id, not a handle; the registry resolves the id
//!   immediately afterwards. Creation and addressing stay separate so the
//!   reaper can resolve pooled sub-connection ids through the same path.
//! - A create failure is a local resource problem, never a transient
//!   network condition; unreachable destinations are represented as a
//!   resolvable handle in the failed state.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;

use crate::connection::{Connection, ConnectionId};

/// TLS material for a destination, referenced by path as loaded from
/// configuration. Context construction happens inside the factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsSettings {
    /// Path to certificate file (PEM).
    pub cert_path: String,
    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Health-check policy stamped onto a new connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthCheckPolicy {
    /// Whether the new connection is kept alive and probed after failures.
    pub enabled: bool,
    /// Seconds between consecutive probes. The registry overwrites this
    /// with the current configured interval before calling the factory.
    pub interval_secs: i64,
}

impl Default for HealthCheckPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 3,
        }
    }
}

/// Options forwarded to the factory when a destination needs a new
/// connection.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Optional TLS material for the destination.
    pub tls: Option<Arc<TlsSettings>>,
    /// Use the RDMA transport instead of TCP.
    pub use_rdma: bool,
    /// Health-check policy for the new connection.
    pub health_check: HealthCheckPolicy,
}

/// Failure to create a connection, as reported by a factory.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CreateError {
    pub message: String,
}

impl CreateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Creates and resolves connection handles for the registry.
///
/// Implementations own the id → handle storage (see
/// [`ConnectionStore`](crate::connection::ConnectionStore) for a ready-made
/// table) and wire in the actual transport.
pub trait ConnectionFactory: Send + Sync {
    /// Create a new connection to `addr` and return its id.
    ///
    /// An `Err` here means local resource exhaustion or misconfiguration;
    /// the registry treats it as fatal.
    fn create(
        &self,
        addr: SocketAddr,
        options: &TransportOptions,
    ) -> Result<ConnectionId, CreateError>;

    /// Resolve an id to its handle. Returns failed handles as well (the
    /// caller inspects [`Connection::is_failed`]); returns `None` only
    /// once the handle is gone.
    fn resolve(&self, id: ConnectionId) -> Option<Arc<dyn Connection>>;
}
