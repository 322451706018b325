use crate::config::SpotifyCredentials;
use async_lock::RwLock;
use base64::{engine::general_purpose::STANDARD, Engine};
use download_processors::AuthError;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const SPOTIFY_TOKEN_ENDPOINT: &str = "https://accounts.spotify.com/api/token";
const REFRESH_MARGIN: Duration = Duration::from_secs(60);
const RETRY_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub(crate) enum SpotifyAuthError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error("Token request rejected with status {status}: {description}")]
    Rejected { status: u16, description: String },
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: Option<String>,
}

impl TokenErrorResponse {
    fn describe(self) -> String {
        match self.error_description {
            Some(description) => format!("{} ({})", description, self.error),
            None => self.error,
        }
    }
}

/// Client-credentials flow: one token for the whole process, replaced by a
/// background task shortly before it expires.
pub(crate) struct SpotifyAuth {
    token_requester: TokenRequester,
    token: Arc<RwLock<Option<String>>>,
    stop_token: CancellationToken,
}

#[derive(Clone)]
struct TokenRequester {
    client: Client,
    authorization: String,
}

impl TokenRequester {
    async fn request_token(&self) -> Result<TokenResponse, SpotifyAuthError> {
        let response = self
            .client
            .post(SPOTIFY_TOKEN_ENDPOINT)
            .header("Authorization", &self.authorization)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let description = match response.json::<TokenErrorResponse>().await {
                Ok(error) => error.describe(),
                Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
            };

            return Err(SpotifyAuthError::Rejected {
                status: status.as_u16(),
                description,
            });
        }

        Ok(response.json::<TokenResponse>().await?)
    }
}

impl SpotifyAuth {
    pub(crate) fn create(
        credentials: &SpotifyCredentials,
        timeout: Duration,
    ) -> Result<Self, SpotifyAuthError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            token_requester: TokenRequester {
                client,
                authorization: basic_authorization(
                    &credentials.client_id,
                    &credentials.client_secret,
                ),
            },
            token: Arc::new(RwLock::new(None)),
            stop_token: CancellationToken::new(),
        })
    }

    /// Obtains the first token and spawns the refresh task. Must complete
    /// before any catalog request is made.
    pub(crate) async fn start(&self) -> Result<(), SpotifyAuthError> {
        let response = self.token_requester.request_token().await?;
        let refresh_in = refresh_delay(response.expires_in);

        self.token.write().await.replace(response.access_token);

        info!(expires_in = response.expires_in, "Catalog access token obtained");

        actix_rt::spawn(refresh_token_loop(
            self.token_requester.clone(),
            self.token.clone(),
            self.stop_token.clone(),
            refresh_in,
        ));

        Ok(())
    }

    pub(crate) async fn current_token(&self) -> Result<String, AuthError> {
        self.token.read().await.clone().ok_or(AuthError::NotStarted)
    }

    pub(crate) fn stop(&self) {
        self.stop_token.cancel();
    }
}

async fn refresh_token_loop(
    token_requester: TokenRequester,
    token: Arc<RwLock<Option<String>>>,
    stop_token: CancellationToken,
    mut refresh_in: Duration,
) {
    loop {
        tokio::select! {
            _ = stop_token.cancelled() => break,
            _ = actix_rt::time::sleep(refresh_in) => (),
        }

        refresh_in = match token_requester.request_token().await {
            Ok(response) => {
                token.write().await.replace(response.access_token);
                debug!(expires_in = response.expires_in, "Catalog access token refreshed");
                refresh_delay(response.expires_in)
            }
            Err(error) => {
                // The previous token stays in use until a refresh succeeds.
                warn!(%error, "Unable to refresh catalog access token, retrying in 10 seconds");
                RETRY_INTERVAL
            }
        };
    }

    debug!("Catalog access token refresh stopped");
}

fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", client_id, client_secret))
    )
}

fn refresh_delay(expires_in: u64) -> Duration {
    Duration::from_secs(expires_in)
        .saturating_sub(REFRESH_MARGIN)
        .max(Duration::from_secs(1))
}
