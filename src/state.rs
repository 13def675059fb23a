//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::inventory::{RecordStore, Server};
use crate::notify::Notifier;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: RecordStore,
}

impl AppState {
    /// Create the application state, seeding the inventory if configured
    pub fn new(config: Config, notifier: Notifier) -> Self {
        let store = if config.inventory.seed_servers {
            RecordStore::with_servers(notifier, Server::examples())
        } else {
            RecordStore::new(notifier)
        };

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: RecordStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the record store
    pub fn store(&self) -> &RecordStore {
        &self.inner.store
    }
}
