//! Configuration loading from disk and the environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the upstream credential.
pub const ENV_API_KEY: &str = "TMDB_API_KEY";
/// Environment variable holding the listen port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable overriding the upstream base URL.
pub const ENV_BASE_URL: &str = "TMDB_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value `{value}` for environment variable {var}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the effective configuration for a process start.
///
/// Order of precedence, lowest first: built-in defaults, the optional TOML
/// file, environment variables, then an explicit port (from the CLI).
pub fn load<F>(
    path: Option<&Path>,
    env: F,
    port: Option<u16>,
) -> Result<ProxyConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config, env)?;
    if let Some(port) = port {
        set_port(&mut config, port);
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay `TMDB_API_KEY`, `PORT` and `TMDB_BASE_URL` onto a configuration.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = env(ENV_API_KEY) {
        config.upstream.api_key = key;
    }

    if let Some(base_url) = env(ENV_BASE_URL) {
        config.upstream.base_url = base_url;
    }

    if let Some(raw) = env(ENV_PORT) {
        let port = raw.trim().parse::<u16>().map_err(|_| ConfigError::Env {
            var: ENV_PORT,
            value: raw.clone(),
        })?;
        set_port(config, port);
    }

    Ok(())
}

fn set_port(config: &mut ProxyConfig, port: u16) {
    let listener = &mut config.listener;
    listener.bind_address = match listener.bind_address.parse::<SocketAddr>() {
        Ok(mut addr) => {
            addr.set_port(port);
            addr.to_string()
        }
        Err(_) => format!("0.0.0.0:{}", port),
    };
}
