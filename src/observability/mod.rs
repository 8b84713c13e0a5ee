//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registry and reaper produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (insert/reap counters, entry-count gauge)
//!
//! Consumers:
//!     → Log aggregation (stdout, file, remote)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Metric updates are cheap enough for the registry's hot path
//! - The entry-count gauge is a debug aid, gated behind a config toggle
//!   and off by default

pub mod logging;
pub mod metrics;
