//! Relay service - binds the listener and serves WebSocket upgrades.

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
    routing::get,
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::domain::{RelayConfig, RelayError};
use crate::metrics::RelayMetrics;
use crate::ws::{ConnectionHandler, SubscriptionRegistry};

/// State shared by every connection
#[derive(Clone)]
struct RelayState {
    registry: Arc<SubscriptionRegistry>,
    metrics: Arc<RelayMetrics>,
    config: Arc<RelayConfig>,
}

/// Bound, not yet serving, relay.
pub struct RelayServer {
    listener: TcpListener,
    state: RelayState,
}

impl RelayServer {
    /// Validate `config` and bind its listen address.
    pub async fn bind(config: RelayConfig) -> Result<Self, RelayError> {
        config.validate()?;

        let addr = config.listen_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| RelayError::Bind { addr, source })?;

        Ok(Self {
            listener,
            state: RelayState {
                registry: Arc::new(SubscriptionRegistry::new()),
                metrics: Arc::new(RelayMetrics::new()),
                config: Arc::new(config),
            },
        })
    }

    /// Actual bound address (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, RelayError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn registry(&self) -> Arc<SubscriptionRegistry> {
        Arc::clone(&self.state.registry)
    }

    pub fn metrics(&self) -> Arc<RelayMetrics> {
        Arc::clone(&self.state.metrics)
    }

    pub fn config(&self) -> &RelayConfig {
        &self.state.config
    }

    /// Serve until the listener fails.
    pub async fn run(self) -> Result<(), RelayError> {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), RelayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        let router = build_router(self.state);

        info!(addr = %addr, "Pose relay listening");
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!(addr = %addr, "Pose relay stopped");
        Ok(())
    }
}

/// Any path upgrades to the relay protocol.
fn build_router(state: RelayState) -> Router {
    Router::new()
        .route("/", get(upgrade))
        .fallback(upgrade)
        .with_state(state)
}

async fn upgrade(State(state): State<RelayState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| async move {
        let handler = ConnectionHandler::new(state.registry, state.metrics, state.config);
        handler.handle(socket).await;
    })
}
