use crate::services::{
    SpotifyClient, SpotifyClientError, SpotifyPlayable, SpotifyPlaylistItem, SpotifyTrack, YtDlp,
};
use async_trait::async_trait;
use download_processors::{
    AudioFetcher, AudioFetcherError, CatalogApi, CatalogError, CatalogId, CatalogKind,
    CollectionItem, CollectionMeta, CollectionPage, PublishedRecency, TrackDescriptor,
    VideoCandidate, VideoSearch, VideoSearchError,
};
use search_providers::{SearchResult, YouTubeClient};
use std::path::Path;

impl From<SpotifyClientError> for CatalogError {
    fn from(error: SpotifyClientError) -> Self {
        match error {
            SpotifyClientError::ApiError { status, message } => {
                CatalogError::from_status(status, &message)
            }
            SpotifyClientError::AuthError(error) => CatalogError::Auth(error),
            SpotifyClientError::ReqwestError(error) => CatalogError::generic(error.to_string()),
        }
    }
}

fn track_descriptor(track: SpotifyTrack) -> Option<TrackDescriptor> {
    let id = match track.id {
        Some(id) if !track.is_local => id,
        _ => return None,
    };

    Some(TrackDescriptor {
        href: track
            .href
            .unwrap_or_else(|| format!("https://api.spotify.com/v1/tracks/{}", id)),
        id: CatalogId::new(id),
        title: track.name,
        primary_artist_name: track
            .artists
            .into_iter()
            .next()
            .map(|artist| artist.name)
            .unwrap_or_default(),
    })
}

fn album_item(track: SpotifyTrack) -> CollectionItem {
    match track_descriptor(track) {
        Some(track) => CollectionItem::Track(track),
        None => CollectionItem::Other {
            item_type: "local".into(),
        },
    }
}

fn playlist_item(item: SpotifyPlaylistItem) -> CollectionItem {
    match item.track {
        Some(SpotifyPlayable::Track(track)) => album_item(track),
        Some(SpotifyPlayable::Episode { .. }) => CollectionItem::Other {
            item_type: "episode".into(),
        },
        None => CollectionItem::Other {
            item_type: "unavailable".into(),
        },
    }
}

#[async_trait]
impl CatalogApi for SpotifyClient {
    async fn get_track(&self, id: &CatalogId) -> Result<TrackDescriptor, CatalogError> {
        let track = self.fetch_track(id).await?;

        track_descriptor(track).ok_or(CatalogError::NotFound)
    }

    async fn get_collection_meta(
        &self,
        kind: CatalogKind,
        id: &CatalogId,
    ) -> Result<CollectionMeta, CatalogError> {
        match kind {
            CatalogKind::Album => {
                let album = self.fetch_album(id).await?;

                Ok(CollectionMeta {
                    id: CatalogId::new(album.id),
                    name: album.name,
                    kind,
                    total_tracks: album.total_tracks,
                })
            }
            CatalogKind::Playlist => {
                let playlist = self.fetch_playlist(id).await?;

                Ok(CollectionMeta {
                    id: CatalogId::new(playlist.id),
                    name: playlist.name,
                    kind,
                    total_tracks: playlist.tracks.total,
                })
            }
            _ => Err(CatalogError::generic(format!("{} is not a collection", kind))),
        }
    }

    async fn get_collection_page(
        &self,
        kind: CatalogKind,
        id: &CatalogId,
        offset: u32,
        page_size: u32,
    ) -> Result<CollectionPage, CatalogError> {
        match kind {
            CatalogKind::Album => {
                let page = self.fetch_album_tracks(id, offset, page_size).await?;

                Ok(CollectionPage {
                    total: page.total,
                    offset: page.offset,
                    items: page.items.into_iter().map(album_item).collect(),
                })
            }
            CatalogKind::Playlist => {
                let page = self.fetch_playlist_tracks(id, offset, page_size).await?;

                Ok(CollectionPage {
                    total: page.total,
                    offset: page.offset,
                    items: page.items.into_iter().map(playlist_item).collect(),
                })
            }
            _ => Err(CatalogError::generic(format!("{} is not a collection", kind))),
        }
    }
}

fn video_candidate(result: SearchResult) -> VideoCandidate {
    VideoCandidate {
        url: result.watch_url(),
        published_recency: result
            .published_time_text
            .as_deref()
            .and_then(PublishedRecency::parse),
        title: result.title,
        view_count: result.view_count,
        duration_seconds: result.duration_seconds,
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(&self, query: &str) -> Result<Vec<VideoCandidate>, VideoSearchError> {
        self.search_videos(query)
            .await
            .map(|results| results.into_iter().map(video_candidate).collect())
            .map_err(VideoSearchError::new)
    }
}

#[async_trait]
impl AudioFetcher for YtDlp {
    async fn fetch(&self, locator: &str, destination: &Path) -> Result<(), AudioFetcherError> {
        self.download_audio(locator, destination)
            .await
            .map_err(AudioFetcherError::new)
    }
}
