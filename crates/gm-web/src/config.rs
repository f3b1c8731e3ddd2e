//! Environment-driven configuration

use gm_rest_client::ApiConfig;
use thiserror::Error;
use url::Url;

/// Public base URL of the backend, as the visitor's browser reaches it
pub const API_URL_ENV: &str = "GITMIRRORS_API_URL";

/// Base URL the render host uses. Optional; defaults to the public one.
/// Deployments where the render host sits next to the backend point this
/// at the internal address.
pub const SERVER_API_URL_ENV: &str = "GITMIRRORS_SERVER_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),

    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
}

/// Read the API configuration from the environment.
pub fn config_from_env() -> Result<ApiConfig, ConfigError> {
    let api_base = require_url(API_URL_ENV)?;
    let config = ApiConfig::new(api_base);

    match optional_url(SERVER_API_URL_ENV)? {
        Some(server_base) => Ok(config.with_server_api_base(server_base)),
        None => Ok(config),
    }
}

fn require_url(var: &'static str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).map_err(|_| ConfigError::MissingVar(var))?;
    parse_url(var, &raw)
}

fn optional_url(var: &'static str) -> Result<Option<Url>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.is_empty() => parse_url(var, &raw).map(Some),
        _ => Ok(None),
    }
}

fn parse_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { var, source })
}
