//! Application state for the tip pool engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::Store;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded role-weight configuration and the persistence layer.
#[derive(Clone)]
pub struct AppState {
    /// The loaded tip pool configuration.
    config: Arc<ConfigLoader>,
    /// The distribution history store.
    store: Store,
}

impl AppState {
    /// Creates a new application state from configuration and store.
    pub fn new(config: ConfigLoader, store: Store) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &Store {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
