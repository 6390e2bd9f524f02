use std::sync::Arc;

use tokio::net::TcpListener;

use catalog_store::ProductStore;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Catalog HTTP server.
pub struct CatalogServer {
    state: AppState,
}

impl CatalogServer {
    /// Server over a fresh in-memory store.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            state: AppState::in_memory(config),
        }
    }

    /// Server over an existing store.
    pub fn with_store(config: ServerConfig, store: Arc<dyn ProductStore>) -> Self {
        Self {
            state: AppState::new(store, config),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }

    pub fn store(&self) -> Arc<dyn ProductStore> {
        Arc::clone(&self.state.store)
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests until the process is stopped.
    pub async fn serve(self) -> ServerResult<()> {
        let addr = self.state.config.bind_addr;
        let app = build_router(self.state);
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("catalog server listening on {}", addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
