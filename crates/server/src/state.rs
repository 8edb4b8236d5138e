use std::sync::Arc;

use common::engine::FsStorage;
use common::prelude::Storage;

use crate::config::ServerConfig;

/// Shared handle threaded through every handler.
///
/// Holds the storage backend behind the capability trait and the read-only
/// server configuration; cloning is cheap.
#[derive(Clone)]
pub struct ServiceState {
    storage: Arc<dyn Storage>,
    config: Arc<ServerConfig>,
}

impl ServiceState {
    pub fn new(config: ServerConfig) -> Self {
        let storage = Arc::new(FsStorage::new(config.storage.clone()));
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
