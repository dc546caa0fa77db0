use std::sync::Arc;

use bastion::config::Config;
use bastion::gateway::Gateway;
use bastion::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.logging.filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();

    if cfg.uses_default_password() {
        tracing::warn!("Administrator password is the built-in default; set ADMIN_PASSWORD");
    }

    tracing::info!(
        capacity = cfg.sessions.capacity,
        timeout_secs = cfg.sessions.timeout_secs,
        "Session store ready"
    );
    tracing::info!("Endpoints: POST /login, POST /logout, GET /admin");

    let gateway = Arc::new(Gateway::from_config(&cfg));

    tokio::select! {
        res = server::listener::run(&cfg, gateway) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
