//! Netscribe Server
//!
//! Tracks infrastructure inventory and free-text documents in memory, with
//! a background worker consuming newly submitted documents.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netscribe_server::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "netscribe_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting Netscribe Server v{}", env!("CARGO_PKG_VERSION"));

    netscribe_server::server::run(config).await
}
