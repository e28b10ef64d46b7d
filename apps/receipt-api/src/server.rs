//! # API Server
//!
//! Binds the listener and runs the router until a shutdown signal arrives.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Server Lifecycle                                 │
//! │                                                                         │
//! │  ApiServer::new(config)                                                 │
//! │       │   builds InMemoryScoreStore + ReceiptService + Router           │
//! │       ▼                                                                 │
//! │  bind()  ──► TcpListener on config.bind_addr                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  serve_with_shutdown(signal)                                            │
//! │       │   in-flight requests finish, new connections refused           │
//! │       ▼                                                                 │
//! │  Ok(()) once the signal fires and connections drain                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use receipt_store::InMemoryScoreStore;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ApiConfig;
use crate::router::build_router;
use crate::service::ReceiptService;

// =============================================================================
// Server Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

// =============================================================================
// Api Server
// =============================================================================

/// The receipt API with its production store.
pub struct ApiServer {
    config: ApiConfig,
    service: Arc<ReceiptService<InMemoryScoreStore>>,
}

impl ApiServer {
    /// Creates a server with an empty score store.
    pub fn new(config: ApiConfig) -> Self {
        ApiServer {
            config,
            service: Arc::new(ReceiptService::new(InMemoryScoreStore::new())),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn service(&self) -> &Arc<ReceiptService<InMemoryScoreStore>> {
        &self.service
    }

    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.service), &self.config)
    }

    /// Binds the configured address.
    pub async fn bind(self) -> Result<BoundServer, ServerError> {
        let addr = self.config.bind_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        Ok(BoundServer {
            router: self.router(),
            listener,
        })
    }
}

/// A server holding its listener, ready to accept connections.
pub struct BoundServer {
    router: Router,
    listener: TcpListener,
}

impl BoundServer {
    /// Actual listen address (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until `signal` completes, then drains open connections.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        info!(%addr, "Receipt API listening");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        info!("Receipt API stopped");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed that source is ignored and the other
/// one still works.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

// =============================================================================
// Unit Tests
// =============================================================================
