use common::storage::StorageError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Website '{0}' not found")]
    WebsiteNotFound(String),

    #[error("Resource '{0}' not found")]
    ResourceNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to upload '{key}': {source}")]
    Upload {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("No unused website id found after {0} attempts")]
    IdExhausted(u32),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Metadata store error: {0}")]
    Metadata(#[from] DbErr),
}

impl SiteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::WebsiteNotFound(_) | Self::ResourceNotFound(_))
    }
}
