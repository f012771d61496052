//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::db::Store;
use crate::reports::ReportContext;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: Store,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, store: Store) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// State over a fresh in-memory store with default configuration.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(AdminConfig::default(), Store::memory())
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    #[must_use]
    pub fn report_context(&self) -> ReportContext {
        self.inner.config.report_context()
    }
}
