//! Room relay HTTP server.

use chat_server::config::Config;
use chat_server::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        "Starting chat-server on {} (store = {})",
        config.socket_addr_string(),
        config.store
    );

    server::run(config).await
}
