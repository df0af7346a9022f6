//! Application state shared across handlers

use std::sync::Arc;

use crate::db::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    pub fn store(&self) -> &Store {
        &self.inner.store
    }
}
