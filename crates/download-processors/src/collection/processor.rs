use crate::catalog::{CatalogApi, CatalogKind, CollectionPaginator, ResolutionError};
use crate::collection::{sanitize_directory_name, CollectionReport};
use crate::track::{DownloadOutcome, TrackFetchOrchestrator};
use crate::CatalogId;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub const DEFAULT_DOWNLOAD_CONCURRENCY: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum CollectionDownloadError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("References of kind {0} are not collections")]
    UnsupportedKind(CatalogKind),
    #[error("Unable to create directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct BulkDownloadCoordinator {
    catalog_api: Arc<dyn CatalogApi>,
    paginator: CollectionPaginator,
    track_fetcher: Arc<TrackFetchOrchestrator>,
    concurrency: usize,
    cancellation_token: CancellationToken,
}

impl BulkDownloadCoordinator {
    pub fn new(
        catalog_api: Arc<dyn CatalogApi>,
        track_fetcher: Arc<TrackFetchOrchestrator>,
        page_size: u32,
        concurrency: usize,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            paginator: CollectionPaginator::new(catalog_api.clone(), page_size),
            catalog_api,
            track_fetcher,
            concurrency: concurrency.clamp(1, Semaphore::MAX_PERMITS),
            cancellation_token,
        }
    }

    /// Downloads every track of an album or playlist into
    /// `destination_dir/<collection name>`.
    ///
    /// Tracks are scheduled as soon as their page arrives, with at most
    /// `concurrency` fetches running at once. A failed track never affects
    /// its siblings; only failing to resolve the collection itself is an error.
    pub async fn download_collection(
        &self,
        kind: CatalogKind,
        id: &CatalogId,
        destination_dir: &Path,
    ) -> Result<CollectionReport, CollectionDownloadError> {
        if !kind.is_collection() {
            return Err(CollectionDownloadError::UnsupportedKind(kind));
        }

        let meta = self
            .catalog_api
            .get_collection_meta(kind, id)
            .await
            .map_err(ResolutionError::from)?;

        let destination = destination_dir.join(sanitize_directory_name(&meta.name));
        tokio::fs::create_dir_all(&destination)
            .await
            .map_err(|source| CollectionDownloadError::CreateDirectory {
                path: destination.clone(),
                source,
            })?;

        info!(
            %kind,
            %id,
            name = %meta.name,
            total_tracks = meta.total_tracks,
            destination = %destination.display(),
            "Downloading {} \"{}\" ({} tracks)",
            kind,
            meta.name,
            meta.total_tracks
        );

        let mut report = CollectionReport::new(meta, destination.clone());
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut cursor = self.paginator.pages(kind, id.clone());
        let mut scheduled = vec![];
        let mut pages_fetched = 0;

        'pages: loop {
            let page = tokio::select! {
                biased;
                _ = self.cancellation_token.cancelled() => {
                    report.cancelled = true;
                    break 'pages;
                }
                page = cursor.next_page() => page,
            };

            let page = match page {
                Ok(Some(page)) => page,
                Ok(None) => break 'pages,
                Err(error) if pages_fetched == 0 => return Err(error.into()),
                Err(error) => {
                    warn!(%kind, %id, %error, "Unable to fetch next page, no more tracks will be scheduled");
                    report.interrupted = Some(error.to_string());
                    break 'pages;
                }
            };
            pages_fetched += 1;

            for track in page.into_tracks() {
                let permit = tokio::select! {
                    biased;
                    _ = self.cancellation_token.cancelled() => {
                        report.cancelled = true;
                        break 'pages;
                    }
                    permit = semaphore.clone().acquire_owned() => permit,
                };

                // The semaphore is never closed.
                let Ok(permit) = permit else {
                    break 'pages;
                };

                let track_fetcher = self.track_fetcher.clone();
                let task_destination = destination.clone();
                let task_track = track.clone();
                let handle = tokio::spawn(async move {
                    let outcome = track_fetcher
                        .fetch_track(&task_track, &task_destination)
                        .await;
                    drop(permit);
                    outcome
                });

                scheduled.push((track, handle));
            }
        }

        if report.cancelled {
            warn!(%kind, %id, scheduled = scheduled.len(), "Download cancelled, waiting for started tracks");
        }

        for (track, handle) in scheduled {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(error) => {
                    error!(%track, %error, "Track download task crashed");
                    DownloadOutcome::FetchFailed {
                        track,
                        cause: error.to_string(),
                    }
                }
            };

            report.record(outcome);
        }

        info!(
            %kind,
            %id,
            succeeded = report.succeeded.len(),
            failed = report.failed_count(),
            cancelled = report.cancelled,
            interrupted = report.interrupted.is_some(),
            "Collection download finished"
        );

        Ok(report)
    }
}
