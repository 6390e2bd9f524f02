use std::sync::Arc;

use catalog_store::{InMemoryProductStore, ProductStore};

use crate::config::ServerConfig;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::new(Arc::new(InMemoryProductStore::new()), config)
    }
}
