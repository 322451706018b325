use crate::catalog::{
    resolve_url, CatalogApi, CatalogError, CatalogKind, CatalogReference, DEFAULT_PAGE_SIZE,
};
use crate::collection::{
    BulkDownloadCoordinator, CollectionDownloadError, CollectionReport,
    DEFAULT_DOWNLOAD_CONCURRENCY,
};
use crate::track::{
    AudioFetcher, DownloadOutcome, SearchQueryStyle, TrackFetchOrchestrator, VideoSearch,
};
use crate::RequestId;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct ProcessorOptions {
    pub page_size: u32,
    pub concurrency: usize,
    pub query_style: SearchQueryStyle,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: DEFAULT_DOWNLOAD_CONCURRENCY,
            query_style: SearchQueryStyle::Plain,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Unable to resolve catalog reference from \"{0}\"")]
    Unresolvable(String),
    #[error("Downloading {0} references is not supported")]
    UnsupportedKind(CatalogKind),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Collection(#[from] CollectionDownloadError),
    #[error("Unable to create directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadReport {
    Track(DownloadOutcome),
    Collection(CollectionReport),
}

impl std::fmt::Display for DownloadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownloadReport::Track(outcome) => {
                write!(f, "{}: {}", outcome.track(), outcome.kind())?;
                if let Some(cause) = outcome.cause() {
                    write!(f, " ({})", cause)?;
                }
                Ok(())
            }
            DownloadReport::Collection(report) => {
                write!(
                    f,
                    "{} \"{}\": {} of {} tracks downloaded into {}",
                    report.collection.kind,
                    report.collection.name,
                    report.succeeded.len(),
                    report.processed_count(),
                    report.destination.display()
                )?;
                for (kind, outcomes) in &report.failed {
                    write!(f, "\n  {}:", kind)?;
                    for outcome in outcomes {
                        write!(f, "\n    {}", outcome.track())?;
                    }
                }
                if report.cancelled {
                    write!(f, "\n  cancelled before every track was scheduled")?;
                }
                if let Some(cause) = &report.interrupted {
                    write!(f, "\n  interrupted: {}", cause)?;
                }
                Ok(())
            }
        }
    }
}

/// Entry point of a download request: resolves a catalog URL and downloads
/// the single track or the whole collection behind it.
pub struct DownloadProcessor {
    catalog_api: Arc<dyn CatalogApi>,
    track_fetcher: Arc<TrackFetchOrchestrator>,
    coordinator: BulkDownloadCoordinator,
}

impl DownloadProcessor {
    pub fn new(
        catalog_api: Arc<dyn CatalogApi>,
        video_search: Arc<dyn VideoSearch>,
        audio_fetcher: Arc<dyn AudioFetcher>,
        options: ProcessorOptions,
        cancellation_token: CancellationToken,
    ) -> Self {
        let track_fetcher = Arc::new(TrackFetchOrchestrator::new(
            video_search,
            audio_fetcher,
            options.query_style,
        ));
        let coordinator = BulkDownloadCoordinator::new(
            catalog_api.clone(),
            track_fetcher.clone(),
            options.page_size,
            options.concurrency,
            cancellation_token,
        );

        Self {
            catalog_api,
            track_fetcher,
            coordinator,
        }
    }

    /// Never fails: errors are logged and `None` is returned.
    pub async fn resolve_and_download(
        &self,
        source_url: &str,
        destination_dir: &Path,
    ) -> Option<DownloadReport> {
        let request_id = RequestId::new();
        let reference = resolve_url(source_url);

        info!(
            %request_id,
            kind = %reference.kind,
            id = %reference.id,
            source_url,
            "Processing download request"
        );

        match self.download(&reference, destination_dir).await {
            Ok(report) => {
                info!(%request_id, "Download request finished");
                Some(report)
            }
            Err(error @ ProcessingError::Unresolvable(_))
            | Err(error @ ProcessingError::UnsupportedKind(_)) => {
                warn!(%request_id, %error, "Download request rejected");
                None
            }
            Err(error) => {
                error!(%request_id, %error, "Download request failed");
                None
            }
        }
    }

    pub async fn download(
        &self,
        reference: &CatalogReference,
        destination_dir: &Path,
    ) -> Result<DownloadReport, ProcessingError> {
        match reference.kind {
            CatalogKind::Track => {
                let track = self.catalog_api.get_track(&reference.id).await?;

                tokio::fs::create_dir_all(destination_dir)
                    .await
                    .map_err(|source| ProcessingError::CreateDirectory {
                        path: destination_dir.to_path_buf(),
                        source,
                    })?;

                let outcome = self.track_fetcher.fetch_track(&track, destination_dir).await;

                Ok(DownloadReport::Track(outcome))
            }
            CatalogKind::Album | CatalogKind::Playlist => {
                let report = self
                    .coordinator
                    .download_collection(reference.kind, &reference.id, destination_dir)
                    .await?;

                Ok(DownloadReport::Collection(report))
            }
            CatalogKind::Artist => Err(ProcessingError::UnsupportedKind(reference.kind)),
            CatalogKind::Unknown => Err(ProcessingError::Unresolvable(
                reference.source_url.clone(),
            )),
        }
    }
}
