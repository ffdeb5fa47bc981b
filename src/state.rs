//! Shared application state

use std::sync::Arc;

use crate::config::Config;
use crate::repository::ProductRepository;

/// State threaded through every handler
///
/// Cloning is cheap; both fields sit behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    products: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(config: Config, products: Arc<dyn ProductRepository>) -> Self {
        Self {
            config: Arc::new(config),
            products,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The product store behind its port
    pub fn products(&self) -> &dyn ProductRepository {
        self.products.as_ref()
    }
}
