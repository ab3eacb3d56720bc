// Application state module
// Bundles the loaded configuration with the backing file store

use crate::store::FileStore;

use super::types::Config;

/// Shared application state, one instance per process
pub struct AppState {
    pub config: Config,
    pub store: FileStore,
}

impl AppState {
    /// Create `AppState` from a loaded configuration
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            store: FileStore::new(&config.storage.file),
        }
    }
}
