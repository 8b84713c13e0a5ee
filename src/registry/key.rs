//! Destination keys.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

/// Identifies a logical destination: a remote address plus an opaque
/// authentication/identity tag.
///
/// Two channels talking to the same address with different credentials must
/// not share a connection, so the tag participates in equality and hashing.
/// Keys are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DestinationKey {
    addr: SocketAddr,
    auth_tag: Option<Arc<str>>,
}

impl DestinationKey {
    /// Key for a destination with no authentication identity.
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            auth_tag: None,
        }
    }

    /// Key for a destination with an authentication/identity tag.
    pub fn with_auth(addr: SocketAddr, auth_tag: impl Into<Arc<str>>) -> Self {
        Self {
            addr,
            auth_tag: Some(auth_tag.into()),
        }
    }

    /// Remote address of the destination.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Authentication tag, if any.
    pub fn auth_tag(&self) -> Option<&str> {
        self.auth_tag.as_deref()
    }
}

impl fmt::Display for DestinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.auth_tag {
            Some(tag) => write!(f, "{}+auth({})", self.addr, tag),
            None => write!(f, "{}", self.addr),
        }
    }
}
