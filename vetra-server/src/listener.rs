//! TCP accept loop and per-connection handlers. One task per connection;
//! each loops read -> dispatch -> write until the peer hangs up, errors, or
//! goes quiet past the read timeout. The dispatcher is fully synchronous,
//! so no lock is ever held across network I/O.

use crate::dispatcher;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use vetra_ledger::BookingService;

#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub read_timeout: Duration,
    pub recv_buffer_bytes: usize,
}

/// Accept forever. A handler failing never stops the accept loop.
pub async fn serve(
    listener: TcpListener,
    service: Arc<BookingService>,
    settings: ConnectionSettings,
) -> anyhow::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        tracing::info!(%peer, "client connected");

        let service = Arc::clone(&service);
        let settings = settings.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, service, settings).await {
                tracing::warn!(%peer, error = %err, "connection error");
            }
            tracing::info!(%peer, "client disconnected");
        });
    }
}

/// One request per read: the wire protocol has no framing, so a message
/// must arrive whole and fit the receive buffer. Oversized or split
/// messages decode as garbage and get an error response; the session
/// survives.
async fn handle_connection(
    mut stream: TcpStream,
    service: Arc<BookingService>,
    settings: ConnectionSettings,
) -> anyhow::Result<()> {
    let peer: SocketAddr = stream.peer_addr()?;
    let mut buf = vec![0u8; settings.recv_buffer_bytes];

    loop {
        let n = match timeout(settings.read_timeout, stream.read(&mut buf)).await {
            Ok(Ok(0)) => return Ok(()),
            Ok(Ok(n)) => n,
            Ok(Err(err)) => return Err(err.into()),
            Err(_) => {
                tracing::info!(%peer, "read timeout, closing idle connection");
                return Ok(());
            }
        };

        let response = dispatcher::dispatch(&service, &buf[..n]);
        let payload = serde_json::to_vec(&response)?;
        stream.write_all(&payload).await?;
    }
}
