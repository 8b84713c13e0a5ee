//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (health-check interval must be positive)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RegistryConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system, on load and reload

use std::net::SocketAddr;

use crate::config::schema::RegistryConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `health_check.interval_secs` was zero or negative.
    NonPositiveHealthCheckInterval(i64),
    /// `observability.metrics_address` does not parse as a socket address.
    InvalidMetricsAddress(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NonPositiveHealthCheckInterval(v) => write!(
                f,
                "health_check.interval_secs must be positive, got {}",
                v
            ),
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "observability.metrics_address is not a socket address: {}", addr)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &RegistryConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // A non-positive probe interval would let a monitored connection be
    // replaced in place, invalidating remove-by-id bookkeeping.
    if config.health_check.interval_secs <= 0 {
        errors.push(ValidationError::NonPositiveHealthCheckInterval(
            config.health_check.interval_secs,
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
