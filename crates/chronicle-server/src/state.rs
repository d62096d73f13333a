//! Shared application state.

use std::sync::Arc;

use chronicle_core::Catalog;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// catalog is immutable, so clones are cheap and reads need no locking.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The event catalog loaded at startup.
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Wrap a freshly built catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}
