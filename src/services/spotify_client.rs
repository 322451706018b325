use crate::services::SpotifyAuth;
use download_processors::AuthError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const SPOTIFY_API_ENDPOINT: &str = "https://api.spotify.com";

#[derive(Debug, thiserror::Error)]
pub(crate) enum SpotifyClientError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    AuthError(#[from] AuthError),
    #[error("Spotify API responded with status {status}: {message}")]
    ApiError { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SpotifyArtist {
    pub(crate) name: String,
}

/// Full and simplified track objects. Local playlist files have no id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SpotifyTrack {
    pub(crate) id: Option<String>,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) artists: Vec<SpotifyArtist>,
    pub(crate) href: Option<String>,
    #[serde(default)]
    pub(crate) is_local: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SpotifyAlbum {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) total_tracks: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SpotifyPlaylistTracksRef {
    pub(crate) total: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SpotifyPlaylist {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) tracks: SpotifyPlaylistTracksRef,
}

/// Playlist entries may hold a track, a podcast episode, or nothing at all
/// when the track was removed from the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum SpotifyPlayable {
    Track(SpotifyTrack),
    Episode { name: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SpotifyPlaylistItem {
    pub(crate) track: Option<SpotifyPlayable>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SpotifyPaging<T> {
    pub(crate) items: Vec<T>,
    pub(crate) total: u32,
    pub(crate) offset: u32,
}

#[derive(Debug, Deserialize)]
struct SpotifyErrorBody {
    error: SpotifyErrorObject,
}

#[derive(Debug, Deserialize)]
struct SpotifyErrorObject {
    message: String,
}

#[derive(Serialize)]
struct PageQuery {
    offset: u32,
    limit: u32,
}

pub(crate) struct SpotifyClient {
    client: Client,
    auth: Arc<SpotifyAuth>,
}

impl SpotifyClient {
    pub(crate) fn create(
        auth: Arc<SpotifyAuth>,
        timeout: Duration,
    ) -> Result<Self, SpotifyClientError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, auth })
    }

    pub(crate) async fn fetch_track(&self, id: &str) -> Result<SpotifyTrack, SpotifyClientError> {
        self.get(&format!("/v1/tracks/{}", id), None).await
    }

    pub(crate) async fn fetch_album(&self, id: &str) -> Result<SpotifyAlbum, SpotifyClientError> {
        self.get(&format!("/v1/albums/{}", id), None).await
    }

    pub(crate) async fn fetch_playlist(
        &self,
        id: &str,
    ) -> Result<SpotifyPlaylist, SpotifyClientError> {
        self.get(&format!("/v1/playlists/{}", id), None).await
    }

    pub(crate) async fn fetch_album_tracks(
        &self,
        id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<SpotifyPaging<SpotifyTrack>, SpotifyClientError> {
        self.get(
            &format!("/v1/albums/{}/tracks", id),
            Some(PageQuery { offset, limit }),
        )
        .await
    }

    pub(crate) async fn fetch_playlist_tracks(
        &self,
        id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<SpotifyPaging<SpotifyPlaylistItem>, SpotifyClientError> {
        self.get(
            &format!("/v1/playlists/{}/tracks", id),
            Some(PageQuery { offset, limit }),
        )
        .await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<PageQuery>,
    ) -> Result<T, SpotifyClientError> {
        let token = self.auth.current_token().await?;

        debug!(path, "Requesting Spotify API...");

        let mut request = self
            .client
            .get(format!("{}{}", SPOTIFY_API_ENDPOINT, path))
            .bearer_auth(token);

        if let Some(query) = &query {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;

            return Err(SpotifyClientError::ApiError {
                status: status.as_u16(),
                message: error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string()),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

/// Extracts the message of a `{"error": {"status": ..., "message": ...}}` body.
pub(crate) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<SpotifyErrorBody>(body)
        .ok()
        .map(|body| body.error.message)
}
