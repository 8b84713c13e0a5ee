//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Build settings + registry → Spawn reaper
//!
//! Shutdown (shutdown.rs):
//!     Signal triggered → Reaper and config loop exit → Join task handles
//! ```
//!
//! # Design Decisions
//! - One broadcast channel fans the shutdown signal out to every
//!   long-running task
//! - Background sleeps are select!-interruptible so teardown is prompt
//! - In-flight registry operations always run to completion

pub mod shutdown;

pub use shutdown::Shutdown;
