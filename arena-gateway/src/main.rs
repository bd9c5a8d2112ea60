//! Entry point for the `arena-gateway` HTTP server.

use std::sync::Arc;

use arena_auditor::{Auditor, AuditorConfig};
use arena_gateway::routes::create_router;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr = std::env::var("ARENA_LISTEN_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3457".to_owned());

    let config = AuditorConfig::from_env();
    let auditor = Arc::new(Auditor::from_config(&config));
    let mode = auditor.mode();
    let app = create_router(auditor);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, ?mode, "arena-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
