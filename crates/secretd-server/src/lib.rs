// ABOUTME: HTTP gateway library for secretd, providing routing and Basic Authentication.
// ABOUTME: Uses Axum with an immutable shared config loaded from environment variables.

pub mod auth;
pub mod config;
pub mod routes;

pub use config::{ConfigError, ServerConfig, SharedConfig};
pub use routes::create_router;
