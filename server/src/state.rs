use std::sync::Arc;

use interview_catalog::Catalog;
use interview_store::QuestionStore;

/// Shared state handed to every handler.
///
/// Generic over the store so the binary can run on [`AnyStore`] while tests
/// use a temporary SQLite file directly.
///
/// [`AnyStore`]: interview_store::AnyStore
pub struct AppState<S> {
    pub store: Arc<S>,
    /// Source for `/api/clear` reloads.
    pub catalog: Arc<Catalog>,
}

impl<S: QuestionStore> AppState<S> {
    pub fn new(store: S, catalog: Catalog) -> Self {
        Self {
            store: Arc::new(store),
            catalog: Arc::new(catalog),
        }
    }
}

// Manual impl: deriving would require `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            catalog: Arc::clone(&self.catalog),
        }
    }
}
