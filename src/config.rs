use download_processors::{
    ProcessorOptions, SearchQueryStyle, DEFAULT_DOWNLOAD_CONCURRENCY, DEFAULT_PAGE_SIZE,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

fn default_download_directory() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_download_concurrency() -> usize {
    DEFAULT_DOWNLOAD_CONCURRENCY
}

fn default_catalog_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    30u64
}

fn default_audio_fetch_timeout_secs() -> u64 {
    600u64
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_embed_thumbnail() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct SpotifyCredentials {
    #[serde(rename = "spotify_client_id")]
    pub(crate) client_id: String,
    #[serde(rename = "spotify_client_secret")]
    pub(crate) client_secret: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    #[serde(default = "default_download_directory")]
    pub(crate) download_directory: PathBuf,
    #[serde(default = "default_download_concurrency")]
    pub(crate) download_concurrency: usize,
    #[serde(default = "default_catalog_page_size")]
    pub(crate) catalog_page_size: u32,
    #[serde(default)]
    pub(crate) search_query_marker: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub(crate) catalog_request_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub(crate) video_search_timeout_secs: u64,
    #[serde(default = "default_audio_fetch_timeout_secs")]
    pub(crate) audio_fetch_timeout_secs: u64,
    #[serde(default = "default_ytdlp_path")]
    pub(crate) ytdlp_path: String,
    #[serde(default = "default_embed_thumbnail")]
    pub(crate) embed_thumbnail: bool,
    #[serde(flatten)]
    pub(crate) spotify_credentials: SpotifyCredentials,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        match envy::from_env::<Self>() {
            Ok(config) => config,
            Err(error) => panic!("Missing environment variable: {:#?}", error),
        }
    }

    pub(crate) fn processor_options(&self) -> ProcessorOptions {
        ProcessorOptions {
            page_size: self.catalog_page_size,
            concurrency: self.download_concurrency,
            query_style: SearchQueryStyle::from_marker(self.search_query_marker.clone()),
        }
    }

    pub(crate) fn catalog_request_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_request_timeout_secs)
    }

    pub(crate) fn video_search_timeout(&self) -> Duration {
        Duration::from_secs(self.video_search_timeout_secs)
    }

    pub(crate) fn audio_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.audio_fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use download_processors::SearchQueryStyle;
    use std::path::PathBuf;
    use std::time::Duration;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn should_apply_defaults() {
        let config: Config = envy::from_iter(vars(&[
            ("SPOTIFY_CLIENT_ID", "client-id"),
            ("SPOTIFY_CLIENT_SECRET", "client-secret"),
        ]))
        .unwrap();

        assert_eq!(config.spotify_credentials.client_id, "client-id");
        assert_eq!(config.spotify_credentials.client_secret, "client-secret");
        assert_eq!(config.download_directory, PathBuf::from("downloads"));
        assert_eq!(config.download_concurrency, 4);
        assert_eq!(config.catalog_page_size, 10);
        assert_eq!(config.search_query_marker, None);
        assert_eq!(config.catalog_request_timeout(), Duration::from_secs(30));
        assert_eq!(config.video_search_timeout(), Duration::from_secs(30));
        assert_eq!(config.audio_fetch_timeout(), Duration::from_secs(600));
        assert_eq!(config.ytdlp_path, "yt-dlp");
        assert!(config.embed_thumbnail);
        assert_eq!(
            config.processor_options().query_style,
            SearchQueryStyle::Plain
        );
    }

    #[test]
    fn should_read_overrides() {
        let config: Config = envy::from_iter(vars(&[
            ("SPOTIFY_CLIENT_ID", "client-id"),
            ("SPOTIFY_CLIENT_SECRET", "client-secret"),
            ("DOWNLOAD_DIRECTORY", "/music"),
            ("DOWNLOAD_CONCURRENCY", "8"),
            ("CATALOG_PAGE_SIZE", "50"),
            ("SEARCH_QUERY_MARKER", "lyrics"),
            ("AUDIO_FETCH_TIMEOUT_SECS", "120"),
            ("YTDLP_PATH", "/usr/local/bin/yt-dlp"),
            ("EMBED_THUMBNAIL", "false"),
        ]))
        .unwrap();

        let options = config.processor_options();

        assert_eq!(config.download_directory, PathBuf::from("/music"));
        assert_eq!(options.concurrency, 8);
        assert_eq!(options.page_size, 50);
        assert_eq!(
            options.query_style,
            SearchQueryStyle::WithMarker("lyrics".into())
        );
        assert_eq!(config.audio_fetch_timeout(), Duration::from_secs(120));
        assert_eq!(config.ytdlp_path, "/usr/local/bin/yt-dlp");
        assert!(!config.embed_thumbnail);
    }

    #[test]
    fn should_require_credentials() {
        let result = envy::from_iter::<_, Config>(vars(&[("SPOTIFY_CLIENT_ID", "client-id")]));

        assert!(result.is_err());
    }
}
