use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use tokio::net::TcpListener;

use crate::proxy::controllers;
use crate::proxy::state::ProxyState;

pub struct ProxyEndpoint {
    listener: TcpListener,
    router: axum::Router<()>,
}

impl ProxyEndpoint {
    pub async fn bind(state: ProxyState) -> Result<Self> {
        let listener = state.bind_socket().await?;
        Ok(Self {
            listener,
            router: Self::router(state),
        })
    }

    /// Routes of the action runtime protocol with middleware applied.
    pub fn router(state: ProxyState) -> axum::Router<()> {
        use tower::ServiceBuilder;
        use tower_http::timeout::TimeoutLayer;

        let service = ServiceBuilder::new()
            .layer(DefaultBodyLimit::max(MAX_REQUEST_SIZE))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                state.config().request_timeout,
            ));

        #[cfg(feature = "compression")]
        let service = service.layer(tower_http::compression::CompressionLayer::new().gzip(true));

        axum::Router::new()
            .route("/", get(health_check))
            .route("/init", post(controllers::init))
            .route("/run", post(controllers::run))
            .layer(service)
            .with_state(state)
    }

    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn serve(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}

fn health_check() -> futures_util::future::Ready<impl IntoResponse> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    futures_util::future::ready(now.as_millis().to_string())
}

const MAX_REQUEST_SIZE: usize = 2 << 20; // 2mb
