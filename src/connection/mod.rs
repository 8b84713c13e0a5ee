//! Connection collaborator interfaces.
//!
//! # Data Flow
//! ```text
//! Registry insert:
//!     → factory.rs (create a handle for a destination)
//!     → id.rs (process-unique connection id)
//!     → handle.rs (Connection trait: failure state, HC flag, releases)
//!
//! Reaper idle pass:
//!     → store.rs (resolve id → live handle)
//!     → handle.rs (enumerate pooled sub-connections, release if idle)
//! ```
//!
//! # Design Decisions
//! - The registry never touches sockets; everything physical is behind
//!   the `Connection` trait
//! - Handles are addressed by id, not by pointer, so a stale id resolves
//!   to "gone" instead of dangling
//! - Factories own handle storage; `ConnectionStore` is the shared
//!   id → handle table they can register into

pub mod factory;
pub mod handle;
pub mod id;
pub mod store;

pub use factory::{ConnectionFactory, CreateError, HealthCheckPolicy, TlsSettings, TransportOptions};
pub use handle::Connection;
pub use id::ConnectionId;
pub use store::ConnectionStore;
