//! Serve command handler

use anyhow::Context;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use crate::api;
use crate::config::Config;

pub async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    info!(
        "campusdesk v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = api::create_app_state_from_config(config).await?;
    let store = state.store().clone();

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web API listening on http://{}", addr);

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    {
        error!("Web server error: {}", e);
    }

    store.close().await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
