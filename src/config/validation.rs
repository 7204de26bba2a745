//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the upstream base URL
//! - Validate value ranges (page >= 1, timeout > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - A missing API key is not an error; the upstream rejects those requests

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("upstream.base_url `{0}` is not a valid URL")]
    BaseUrl(String),

    #[error("upstream.base_url `{0}` must use http or https")]
    BaseUrlScheme(String),

    #[error("upstream.language must not be empty")]
    EmptyLanguage,

    #[error("upstream.page must be at least 1")]
    ZeroPage,

    #[error("upstream.timeout_secs must be greater than 0 when set")]
    ZeroTimeout,

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let upstream = &config.upstream;
    match Url::parse(&upstream.base_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::BaseUrlScheme(upstream.base_url.clone()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::BaseUrl(upstream.base_url.clone())),
    }

    if upstream.language.trim().is_empty() {
        errors.push(ValidationError::EmptyLanguage);
    }
    if upstream.page == 0 {
        errors.push(ValidationError::ZeroPage);
    }
    if upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
