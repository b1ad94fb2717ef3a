use interview_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("skill '{0}' already exists")]
    SkillExists(String),
    #[error("invalid level '{level}', expected one of basic, intermediate, advanced")]
    InvalidLevel { level: String },
    #[error("invalid catalog document: {0}")]
    InvalidDocument(String),
}
