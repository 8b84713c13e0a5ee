//! Connection registry subsystem.
//!
//! # Data Flow
//! ```text
//! Caller insert/find/remove:
//!     → key.rs (destination identity)
//!     → map.rs (locked key → entry map, factory calls, ref counting)
//!     → entry.rs (ownership mode decides the release path)
//!
//! Background reaping:
//!     reaper.rs (1s cadence, cancellable)
//!     → map.rs list / list_orphans / run_reap_cycle
//!     → forced removal through the same locked path as callers
//!
//! Process-wide access:
//!     global.rs (one-time install, forwarding helpers)
//! ```
//!
//! # Design Decisions
//! - One entry per destination key, linearized by a single mutex
//! - The registry's demand count is separate from the handle's own
//!   reference count; the ownership mode tag keeps the asymmetric
//!   release paths from being mixed up
//! - The reaper has no privileged access to the map

pub mod entry;
pub mod global;
pub mod key;
pub mod map;
pub mod reaper;

pub use key::DestinationKey;
pub use map::{ConnectionRegistry, RegistryOptions};
pub use reaper::Reaper;
