use crate::youtube::parser::{parse_search_results, ParseError};
use crate::SearchResults;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const YOUTUBE_HOST: &str = "https://www.youtube.com";

#[derive(Debug, thiserror::Error)]
pub enum YouTubeClientError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    ParseError(#[from] ParseError),
}

pub struct YouTubeClient {
    client: Client,
}

impl YouTubeClient {
    pub fn create(timeout: Duration) -> Result<Self, YouTubeClientError> {
        let mut headers = HeaderMap::new();
        // Relative publish times and view counts are parsed in English.
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Self { client })
    }

    pub async fn search_videos(&self, query_str: &str) -> Result<SearchResults, YouTubeClientError> {
        #[derive(Serialize)]
        struct Query<'a> {
            search_query: &'a str,
            hl: &'a str,
        }

        let query = Query {
            search_query: query_str,
            hl: "en",
        };

        let response = self
            .client
            .get(format!("{}/results", YOUTUBE_HOST))
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        let raw_html = response.text().await?;
        let results = parse_search_results(&raw_html)?;

        debug!(query = query_str, results = results.len(), "Video search completed");

        Ok(results)
    }
}
