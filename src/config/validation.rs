//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0) and rule syntax (CORS origins)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::GatewayConfig;
use crate::security::origin::OriginPolicy;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,
    #[error("api.path_prefix {0:?} must start with '/'")]
    InvalidPathPrefix(String),
    #[error("api.max_body_size must be greater than zero")]
    ZeroBodySize,
    #[error("cors.allow_origin is invalid: {0}")]
    InvalidAllowOrigin(String),
    #[error("bus.url must not be empty")]
    EmptyBusUrl,
    #[error("bus.request_timeout_ms must be greater than zero")]
    ZeroBusTimeout,
    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Validate a configuration, reporting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if !config.api.path_prefix.starts_with('/') {
        errors.push(ValidationError::InvalidPathPrefix(
            config.api.path_prefix.clone(),
        ));
    }
    if config.api.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodySize);
    }
    if let Err(err) = OriginPolicy::from_rule(&config.cors.allow_origin) {
        errors.push(ValidationError::InvalidAllowOrigin(err.to_string()));
    }
    if config.bus.url.trim().is_empty() {
        errors.push(ValidationError::EmptyBusUrl);
    }
    if config.bus.request_timeout_ms == 0 {
        errors.push(ValidationError::ZeroBusTimeout);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
