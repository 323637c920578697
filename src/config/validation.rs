//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All problems are collected
//! rather than stopping at the first.

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::converter::TokenSource;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("converter.tokenSource '{0}' is not one of username, password, combined, unchanged, decoded")]
    InvalidTokenSource(String),

    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("upstream.address '{0}' is not a valid authority")]
    InvalidUpstream(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.log_level '{0}' is not a known level")]
    InvalidLogLevel(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if TokenSource::from_str(&config.converter.token_source).is_err() {
        errors.push(ValidationError::InvalidTokenSource(
            config.converter.token_source.clone(),
        ));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.upstream.address.is_empty()
        || Authority::from_str(&config.upstream.address).is_err()
    {
        errors.push(ValidationError::InvalidUpstream(config.upstream.address.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
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
