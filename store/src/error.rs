use std::path::PathBuf;

/// Errors from the persistence layer.
///
/// Conflicting (skill, text) inserts on PostgreSQL are not errors: the insert
/// is skipped by the statement itself. Lookups that match no row are reported
/// as `Ok(false)` / `Ok(None)` rather than through this type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to connect to {backend}: {source}")]
    Connection {
        backend: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("SQLite file not found: {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("table '{0}' not found in source database")]
    TableMissing(String),
    #[error("source database contains no rows to migrate")]
    EmptySource,
}

impl StoreError {
    pub(crate) fn connection(backend: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| StoreError::Connection { backend, source }
    }
}
