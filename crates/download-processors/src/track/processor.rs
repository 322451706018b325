use crate::catalog::TrackDescriptor;
use crate::track::{best_candidate, AudioFetcher, DownloadOutcome, SearchQueryStyle, VideoSearch};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct TrackFetchOrchestrator {
    video_search: Arc<dyn VideoSearch>,
    audio_fetcher: Arc<dyn AudioFetcher>,
    query_style: SearchQueryStyle,
}

impl TrackFetchOrchestrator {
    pub fn new(
        video_search: Arc<dyn VideoSearch>,
        audio_fetcher: Arc<dyn AudioFetcher>,
        query_style: SearchQueryStyle,
    ) -> Self {
        Self {
            video_search,
            audio_fetcher,
            query_style,
        }
    }

    /// Single attempt: search, pick the best video, fetch its audio.
    /// Failures are reported in the outcome, never returned as errors.
    pub async fn fetch_track(
        &self,
        track: &TrackDescriptor,
        destination: &Path,
    ) -> DownloadOutcome {
        let query = self.query_style.build_query(track);

        debug!(%query, "Searching for a video matching the track...");

        let candidates = match self.video_search.search(&query).await {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(%track, %error, "Video search failed");
                return DownloadOutcome::LookupFailed {
                    track: track.clone(),
                    cause: error.to_string(),
                };
            }
        };

        let candidates_count = candidates.len();
        let selected = match best_candidate(candidates) {
            Some(selected) => selected,
            None => {
                warn!(%track, "No video found for the track");
                return DownloadOutcome::NotFound {
                    track: track.clone(),
                };
            }
        };

        debug!(
            %track,
            url = %selected.url,
            title = %selected.title,
            candidates_count,
            "Selected best matching video"
        );

        match self
            .audio_fetcher
            .fetch(&selected.url, destination)
            .await
        {
            Ok(()) => {
                info!(%track, url = %selected.url, "Track downloaded");
                DownloadOutcome::Success {
                    track: track.clone(),
                }
            }
            Err(error) => {
                error!(%track, url = %selected.url, %error, "Unable to download track audio");
                DownloadOutcome::FetchFailed {
                    track: track.clone(),
                    cause: error.to_string(),
                }
            }
        }
    }
}
