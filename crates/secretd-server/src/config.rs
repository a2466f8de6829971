// ABOUTME: Configuration loading and validation for the secretd gateway.
// ABOUTME: Reads credentials, secret message, and port from environment variables at startup.

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("USERNAME is set but empty; refusing to build a credential entry with no username")]
    EmptyUsername,

    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

/// Gateway configuration loaded once at startup and immutable thereafter.
///
/// Handlers and middleware receive it behind an [`Arc`] rather than reading
/// the process environment per request, so tests can inject arbitrary values.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub username: String,
    pub password: String,
    pub secret_message: String,
    pub port: u16,
}

/// Type alias for the Arc-wrapped config shared with the router and auth layer.
pub type SharedConfig = Arc<ServerConfig>;

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - USERNAME: Basic-auth username for /secret (required, non-empty)
    /// - PASSWORD: Basic-auth password for /secret (required, may be empty)
    /// - SECRET_MESSAGE: body returned by an authorized /secret request (required, may be empty)
    /// - PORT: listener port (default: 3000)
    ///
    /// Missing required variables fail fast instead of baking undefined values
    /// into the credential check.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// `from_env` passes the process environment; tests pass a closure over
    /// fixed values so they never mutate shared process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let username = lookup("USERNAME").ok_or(ConfigError::Missing("USERNAME"))?;
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }

        // An empty password or secret message is legal; only absence is an error.
        let password = lookup("PASSWORD").ok_or(ConfigError::Missing("PASSWORD"))?;
        let secret_message =
            lookup("SECRET_MESSAGE").ok_or(ConfigError::Missing("SECRET_MESSAGE"))?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 3000,
        };

        Ok(Self {
            username,
            password,
            secret_message,
            port,
        })
    }
}
