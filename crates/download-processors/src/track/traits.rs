use crate::track::VideoCandidate;
use async_trait::async_trait;
use std::path::Path;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct VideoSearchError(BoxedError);

impl VideoSearchError {
    pub fn new(error: impl Into<BoxedError>) -> Self {
        Self(error.into())
    }
}

#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Candidates in the order the platform returned them; not pre-ranked.
    async fn search(&self, query: &str) -> Result<Vec<VideoCandidate>, VideoSearchError>;
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AudioFetcherError(BoxedError);

impl AudioFetcherError {
    pub fn new(error: impl Into<BoxedError>) -> Self {
        Self(error.into())
    }
}

#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Writes one audio file under `destination`. The directory must exist.
    async fn fetch(&self, locator: &str, destination: &Path) -> Result<(), AudioFetcherError>;
}
