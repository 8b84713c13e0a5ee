//! Metrics collection and exposition.
//!
//! # Metrics
//! - `registry_inserts_total` (counter): inserts by outcome (hit, create,
//!   replace)
//! - `registry_reaped_total` (counter): entries force-removed by the reaper
//! - `registry_entries` (gauge): current entry count; only recorded when
//!   `debug.expose_registry` is on
//!
//! # Design Decisions
//! - Recording helpers are no-ops until an exporter is installed
//! - The Prometheus endpoint is optional and off by default

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Count one insert by outcome: "hit", "create" or "replace".
pub fn record_insert(outcome: &'static str) {
    metrics::counter!("registry_inserts_total", "outcome" => outcome).increment(1);
}

/// Count one forced removal performed by the reaper.
pub fn record_reaped() {
    metrics::counter!("registry_reaped_total").increment(1);
}

/// Record the current number of registry entries.
pub fn record_registry_size(len: usize) {
    metrics::gauge!("registry_entries").set(len as f64);
}
