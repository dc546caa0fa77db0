use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::gateway::Gateway;
use crate::http::connection::{Connection, ReadLimits};

pub async fn run(cfg: &Config, gateway: Arc<Gateway>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);

    let limits = ReadLimits {
        max_request_bytes: cfg.server.max_request_bytes,
        read_timeout: Duration::from_secs(cfg.server.read_timeout_secs),
    };

    serve(listener, gateway, limits).await
}

/// Accepts connections forever, one task per connection.
///
/// A failed accept or a failed connection is logged and the loop carries on.
pub async fn serve(
    listener: TcpListener,
    gateway: Arc<Gateway>,
    limits: ReadLimits,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Accept failed");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let expired = gateway.sweep();
        if expired > 0 {
            info!(expired, "Expired sessions deactivated");
        }

        let gateway = Arc::clone(&gateway);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, gateway, limits);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
