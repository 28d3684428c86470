use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vetra_catalog::{seed, InventoryStore};
use vetra_ledger::BookingService;
use vetra_server::{serve, ConnectionSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vetra_server=debug,vetra_ledger=debug,vetra_catalog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = vetra_server::config::Config::load()?;

    let store = Arc::new(InventoryStore::new(seed::catalog()));
    let service = Arc::new(BookingService::new(store));
    let settings = ConnectionSettings {
        read_timeout: Duration::from_secs(config.server.read_timeout_seconds),
        recv_buffer_bytes: config.server.recv_buffer_bytes,
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Booking server listening on {}", addr);

    serve(listener, service, settings).await
}
