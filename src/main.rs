// ABOUTME: Entry point for the secretd binary.
// ABOUTME: Loads environment configuration, initializes tracing, and starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use secretd_server::{ServerConfig, create_router};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load a .env file if present; real environment variables take precedence.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "secretd=debug,tower_http=debug".parse().unwrap()),
        )
        .init();

    let config = Arc::new(ServerConfig::from_env().context("invalid configuration")?);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let local_addr = listener.local_addr()?;
    tracing::info!("secretd listening on http://{}", local_addr);

    let app = create_router(config).layer(TraceLayer::new_for_http());
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
