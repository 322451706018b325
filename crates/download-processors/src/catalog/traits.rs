use crate::catalog::{CatalogKind, CollectionMeta, CollectionPage, TrackDescriptor};
use crate::CatalogId;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Catalog authentication has not been started")]
    NotStarted,
    #[error("Unable to obtain access token: {0}")]
    TokenRequestFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Resource not found")]
    NotFound,
    #[error("Invalid id")]
    InvalidId,
    #[error("Catalog request failed: {message}")]
    Generic { message: String },
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl CatalogError {
    /// Translates an error status reported by the catalog into the error taxonomy.
    pub fn from_status(status: u16, message: &str) -> Self {
        let normalized = message.to_lowercase();

        match status {
            404 if normalized.contains("not found") => CatalogError::NotFound,
            400 if normalized.contains("invalid") && normalized.contains("id") => {
                CatalogError::InvalidId
            }
            _ => CatalogError::Generic {
                message: format!("{} ({})", message, status),
            },
        }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        CatalogError::Generic {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_track(&self, id: &CatalogId) -> Result<TrackDescriptor, CatalogError>;
    async fn get_collection_meta(
        &self,
        kind: CatalogKind,
        id: &CatalogId,
    ) -> Result<CollectionMeta, CatalogError>;
    async fn get_collection_page(
        &self,
        kind: CatalogKind,
        id: &CatalogId,
        offset: u32,
        page_size: u32,
    ) -> Result<CollectionPage, CatalogError>;
}
