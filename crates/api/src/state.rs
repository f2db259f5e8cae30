use std::sync::Arc;

use showcase_client::CatalogSource;
use showcase_pipeline::OrderResolver;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Where orders, items, versions and media are read from.
    pub catalog: Arc<dyn CatalogSource>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogSource>, config: ServerConfig) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
        }
    }

    pub fn resolver(&self) -> OrderResolver<dyn CatalogSource> {
        OrderResolver::new(Arc::clone(&self.catalog))
    }
}
