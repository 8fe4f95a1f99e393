use anyhow::{Context, Result};
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::service::ScrapeService;

pub mod handlers;
pub mod models;

pub fn create_router(service: Arc<ScrapeService>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/scrape", get(handlers::scrape_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(service)
        .layer(cors)
}

/// HTTP front of the scrape service. Nothing is bound until `start`.
pub struct ScrapeServer {
    addr: String,
    service: Arc<ScrapeService>,
}

impl ScrapeServer {
    pub fn new(config: &Config, service: Arc<ScrapeService>) -> Self {
        Self {
            addr: config.bind_addr(),
            service,
        }
    }

    pub async fn start(self) -> Result<ServerHandle> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("failed to bind {}", self.addr))?;
        let local_addr = listener.local_addr()?;
        log::info!("scrape server listening on http://{local_addr}");

        let token = CancellationToken::new();
        let shutdown = token.clone();
        let app = create_router(self.service);
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await
        });

        Ok(ServerHandle {
            local_addr,
            token,
            task,
        })
    }
}

pub struct ServerHandle {
    local_addr: SocketAddr,
    token: CancellationToken,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn shutdown(self) -> Result<()> {
        self.token.cancel();
        self.wait().await
    }

    /// Wait until the server stops on its own or through `shutdown`.
    pub async fn wait(self) -> Result<()> {
        self.task
            .await
            .context("server task panicked")?
            .context("server error")?;
        log::info!("scrape server on {} stopped", self.local_addr);
        Ok(())
    }
}
