//! Runtime-reloadable settings.
//!
//! The registry and the reaper re-read idle-timeout and defer-close on
//! every operation/cycle, so a config reload takes effect without
//! restarting anything. The values are independent scalars published
//! through atomics; readers never take a lock. The full config snapshot is
//! kept alongside (arc-swap) for consumers that want a consistent view of
//! init-time sections.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;

use crate::config::schema::RegistryConfig;

/// Lock-free view of the reloadable registry configuration.
#[derive(Debug)]
pub struct RegistrySettings {
    health_check_interval_secs: AtomicI64,
    idle_timeout_secs: AtomicI64,
    defer_close_secs: AtomicI64,
    reserve_one_idle: AtomicBool,
    expose_registry: AtomicBool,
    snapshot: ArcSwap<RegistryConfig>,
}

impl RegistrySettings {
    /// Build settings from a validated configuration.
    pub fn from_config(config: RegistryConfig) -> Self {
        Self {
            health_check_interval_secs: AtomicI64::new(config.health_check.interval_secs),
            idle_timeout_secs: AtomicI64::new(config.idle_timeout_secs),
            defer_close_secs: AtomicI64::new(config.defer_close_secs),
            reserve_one_idle: AtomicBool::new(config.reserve_one_idle),
            expose_registry: AtomicBool::new(config.debug.expose_registry),
            snapshot: ArcSwap::from_pointee(config),
        }
    }

    /// Publish a reloaded configuration. Readers observe the new scalar
    /// values on their next access.
    pub fn apply(&self, config: RegistryConfig) {
        self.health_check_interval_secs
            .store(config.health_check.interval_secs, Ordering::Relaxed);
        self.idle_timeout_secs
            .store(config.idle_timeout_secs, Ordering::Relaxed);
        self.defer_close_secs
            .store(config.defer_close_secs, Ordering::Relaxed);
        self.reserve_one_idle
            .store(config.reserve_one_idle, Ordering::Relaxed);
        self.expose_registry
            .store(config.debug.expose_registry, Ordering::Relaxed);
        self.snapshot.store(Arc::new(config));
    }

    /// Seconds between health-check probes, stamped onto new connections.
    pub fn health_check_interval_secs(&self) -> i64 {
        self.health_check_interval_secs.load(Ordering::Relaxed)
    }

    /// Idle threshold for pooled connections; `None` disables idle reaping.
    pub fn idle_timeout(&self) -> Option<Duration> {
        let secs = self.idle_timeout_secs.load(Ordering::Relaxed);
        (secs > 0).then(|| Duration::from_secs(secs as u64))
    }

    /// Grace window for zero-reference entries; zero means close
    /// immediately.
    pub fn defer_close(&self) -> Duration {
        let secs = self.defer_close_secs.load(Ordering::Relaxed);
        if secs > 0 {
            Duration::from_secs(secs as u64)
        } else {
            Duration::ZERO
        }
    }

    /// Keep the first idle pooled connection alive during idle reaping.
    pub fn reserve_one_idle(&self) -> bool {
        self.reserve_one_idle.load(Ordering::Relaxed)
    }

    /// Expose the registry entry count as a metric.
    pub fn expose_registry(&self) -> bool {
        self.expose_registry.load(Ordering::Relaxed)
    }

    /// Whether the background reaper has anything to do.
    pub fn reaper_enabled(&self) -> bool {
        self.idle_timeout().is_some() || !self.defer_close().is_zero()
    }

    /// Current full configuration snapshot.
    pub fn current(&self) -> Arc<RegistryConfig> {
        self.snapshot.load_full()
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::from_config(RegistryConfig::default())
    }
}
