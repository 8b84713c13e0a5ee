//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Defaults match the long-standing client defaults: probe every 3 seconds,
//! close pooled connections idle for 30 seconds, close unreferenced
//! connections immediately.

use serde::{Deserialize, Serialize};

/// Root configuration for the connection registry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Health-check settings for new connections.
    pub health_check: HealthCheckConfig,

    /// Pooled connections without data transmission for this many seconds
    /// are closed. No effect for non-positive values.
    pub idle_timeout_secs: i64,

    /// Defer close of connections for this many seconds even if nobody
    /// references them. Close immediately for non-positive values.
    pub defer_close_secs: i64,

    /// Keep one idle pooled connection per main connection when idle
    /// reaping is active.
    pub reserve_one_idle: bool,

    /// Debug exposure settings.
    pub debug: DebugConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Health-check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Seconds between consecutive health-check probes. Must be positive:
    /// with a positive interval a failed-but-monitored connection is never
    /// replaced in place, which is what lets `remove` skip id comparison
    /// safely at call sites that have no expected id.
    pub interval_secs: i64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self { interval_secs: 3 }
    }
}

/// Debug-only exposure toggles.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DebugConfig {
    /// Expose the registry entry count as a metric. Off by default.
    pub expose_registry: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            health_check: HealthCheckConfig::default(),
            idle_timeout_secs: 30,
            defer_close_secs: 0,
            reserve_one_idle: false,
            debug: DebugConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.health_check.interval_secs, 3);
        assert_eq!(config.idle_timeout_secs, 30);
        assert_eq!(config.defer_close_secs, 0);
        assert!(!config.reserve_one_idle);
        assert!(!config.debug.expose_registry);
    }

    #[test]
    fn parses_partial_toml() {
        let config: RegistryConfig = toml::from_str(
            r#"
            idle_timeout_secs = 60

            [health_check]
            interval_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.idle_timeout_secs, 60);
        assert_eq!(config.health_check.interval_secs, 5);
        // untouched sections keep their defaults
        assert_eq!(config.defer_close_secs, 0);
        assert_eq!(config.observability.log_level, "info");
    }
}
