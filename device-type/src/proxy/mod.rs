//! HTTP server speaking the action runtime protocol:
//! `POST /init`, then any number of `POST /run` with `{"value": {...}}`.

use anyhow::Context;

pub use self::config::ProxyConfig;
pub use self::endpoint::ProxyEndpoint;
pub use self::state::ProxyState;
use crate::action::CreateDeviceType;

pub mod config;
pub mod controllers;
pub mod endpoint;
pub mod models;
pub mod state;

/// Binds the proxy and serves it until the task is dropped.
pub async fn serve(config: ProxyConfig, action: CreateDeviceType) -> anyhow::Result<()> {
    let state = ProxyState::builder()
        .with_config(config)
        .with_action(action)
        .build();

    let endpoint = state
        .bind_endpoint()
        .await
        .context("failed to bind action proxy")?;
    tracing::info!(listen_addr = %endpoint.local_addr()?, "action proxy started");

    endpoint.serve().await.context("action proxy failed")?;
    tracing::info!("action proxy stopped");
    Ok(())
}
