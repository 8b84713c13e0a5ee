//! The connection handle trait.
//!
//! A `Connection` is one physical (or logically pooled) connection owned by
//! the transport layer. It keeps its own internal reference count; the
//! registry only ever manipulates that count through the explicit release
//! methods below, never by guessing.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::connection::ConnectionId;

/// One client-side connection, as seen by the registry.
///
/// Implementations are shared (`Arc<dyn Connection>`) between the registry,
/// the health-check subsystem and any caller holding a logical reference.
pub trait Connection: Send + Sync + fmt::Debug {
    /// Process-unique id of this handle.
    fn id(&self) -> ConnectionId;

    /// Remote endpoint this connection targets.
    fn remote_addr(&self) -> SocketAddr;

    /// True once the connection has failed. Without health checking the
    /// failure is permanent; with it, the handle keeps probing and may
    /// recover on its own.
    fn is_failed(&self) -> bool;

    /// True if the health-check subsystem holds a keep-alive reference to
    /// this handle and will retry it after failures.
    fn health_check_enabled(&self) -> bool;

    /// Ids of the pooled sub-connections currently owned by this main
    /// connection. Empty for single-connection transports.
    fn pooled_connections(&self) -> Vec<ConnectionId>;

    /// Release one logical reference on the handle's internal count.
    fn release(&self);

    /// Release the health-check keep-alive reference. Only meaningful when
    /// [`Connection::health_check_enabled`] is true.
    fn release_health_check(&self);

    /// Release this connection if it has had no data transmission for at
    /// least `idle`. The handle tracks its own idle time; the registry
    /// does not.
    fn release_if_idle(&self, idle: Duration);
}
