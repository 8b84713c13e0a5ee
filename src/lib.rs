//! Connection registry for an RPC client runtime.
//!
//! Maps a logical destination (remote address plus authentication identity)
//! to a shared, reference-counted connection handle. Concurrent callers
//! asking for the same destination share one connection; permanently failed
//! connections are replaced; connections nobody references any more are
//! reaped by a background task after a configurable grace window.
//!
//! # Architecture Overview
//!
//! ```text
//!  Caller threads                        ┌──────────────────────────────┐
//!  ──────────── insert/find/remove ─────▶│      ConnectionRegistry      │
//!                                        │  key → { handle, ref_count } │
//!                                        └──────┬───────────────┬───────┘
//!                                               │               │
//!                             create/resolve    │               │ list/list_orphans
//!                                               ▼               ▼
//!                                    ┌──────────────────┐  ┌─────────┐
//!                                    │ ConnectionFactory│  │ Reaper  │ (one task,
//!                                    │  (collaborator)  │  │         │  ~1s cadence)
//!                                    └──────────────────┘  └─────────┘
//! ```
//!
//! Socket I/O, the wire protocol, health-check probing and TLS context
//! construction live behind the [`Connection`] and [`ConnectionFactory`]
//! traits and are out of scope for this crate.

// Core subsystems
pub mod config;
pub mod connection;
pub mod error;
pub mod registry;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::RegistryConfig;
pub use config::settings::RegistrySettings;
pub use connection::{Connection, ConnectionFactory, ConnectionId, TransportOptions};
pub use error::RegistryError;
pub use lifecycle::Shutdown;
pub use registry::{ConnectionRegistry, DestinationKey, Reaper};
