//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, paths and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ForwardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ForwardConfig;
use crate::observability::logging::LogFormat;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("listener.forward_path must start with '/' (got '{0}')")]
    InvalidForwardPath(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("observability.log_format: unknown format '{0}'")]
    UnknownLogFormat(String),
}

pub fn validate_config(config: &ForwardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if !config.listener.forward_path.starts_with('/') {
        errors.push(ValidationError::InvalidForwardPath(
            config.listener.forward_path.clone(),
        ));
    }

    let positive = [
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("upstream.connect_timeout_secs", config.upstream.connect_timeout_secs),
        ("upstream.request_timeout_secs", config.upstream.request_timeout_secs),
        ("security.max_body_size", config.security.max_body_size as u64),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::Zero(field));
        }
    }

    if LogFormat::parse(&config.observability.log_format).is_none() {
        errors.push(ValidationError::UnknownLogFormat(
            config.observability.log_format.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
