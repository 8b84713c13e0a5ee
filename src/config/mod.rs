//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RegistryConfig (validated, immutable)
//!     → settings.rs (reloadable scalars published through atomics)
//!
//! On reload:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → RegistrySettings::apply (atomic stores + snapshot swap)
//!     → registry and reaper observe new values on their next operation
//! ```
//!
//! # Design Decisions
//! - A loaded config is immutable; reloads produce a whole new snapshot
//! - The registry never locks to read a setting: idle-timeout, defer-close
//!   and friends are plain atomics re-read on every cycle/operation
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod settings;
pub mod validation;
pub mod watcher;

pub use schema::RegistryConfig;
pub use settings::RegistrySettings;
