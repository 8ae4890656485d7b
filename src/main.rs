use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use userbase::config::CONFIG;
use userbase::{InMemoryLogging, InMemoryStorage, UserbaseService, api};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!(config = ?*CONFIG, "starting userbase");

    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let service = Arc::new(UserbaseService::new(storage, logging));

    let app = api::app(service, CONFIG.request_timeout());

    let addr = CONFIG.socket_addr();
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
