use crate::config::Config;
use crate::services::{OperatorPrompt, PromptError, SpotifyAuth, SpotifyClient, YtDlp};
use actix_rt::signal::unix;
use download_processors::DownloadProcessor;
use futures_lite::FutureExt;
use search_providers::YouTubeClient;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod config;
mod impls;
mod services;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let mut terminate = unix::signal(unix::SignalKind::terminate())?;
    let mut interrupt = unix::signal(unix::SignalKind::interrupt())?;

    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    info!(version = VERSION, "Starting application...");

    let spotify_auth = Arc::new(
        SpotifyAuth::create(&config.spotify_credentials, config.catalog_request_timeout())
            .expect("Failed to create HTTP Client"),
    );

    if let Err(error) = spotify_auth.start().await {
        error!(%error, "Unable to authenticate at Spotify");
        std::process::exit(1);
    }

    let spotify_client = SpotifyClient::create(spotify_auth.clone(), config.catalog_request_timeout())
        .expect("Failed to create HTTP Client");
    let youtube_client = YouTubeClient::create(config.video_search_timeout())
        .expect("Failed to create HTTP Client");
    let ytdlp = YtDlp::new(
        &config.ytdlp_path,
        config.audio_fetch_timeout(),
        config.embed_thumbnail,
    );

    let cancellation_token = CancellationToken::new();

    let download_processor = DownloadProcessor::new(
        Arc::from(spotify_client),
        Arc::from(youtube_client),
        Arc::from(ytdlp),
        config.processor_options(),
        cancellation_token.clone(),
    );

    actix_rt::spawn({
        let cancellation_token = cancellation_token.clone();

        async move {
            interrupt.recv().or(terminate.recv()).await;

            info!("Received shutdown signal. Finishing started downloads...");

            cancellation_token.cancel();
        }
    });

    info!("Application started");

    let mut prompt = OperatorPrompt::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        config.download_directory.clone(),
    );

    if let Err(error) = run_operator_loop(&download_processor, &mut prompt, &cancellation_token).await
    {
        error!(%error, "Operator dialogue failed");
    }

    spotify_auth.stop();

    info!("Application stopped");

    Ok(())
}

async fn run_operator_loop<R, W>(
    download_processor: &DownloadProcessor,
    prompt: &mut OperatorPrompt<R, W>,
    cancellation_token: &CancellationToken,
) -> Result<(), PromptError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let request = prompt
            .next_request()
            .or(async {
                cancellation_token.cancelled().await;
                Ok(None)
            })
            .await?;

        let request = match request {
            Some(request) => request,
            None => break,
        };

        if let Some(report) = download_processor
            .resolve_and_download(&request.source_url, &request.destination)
            .await
        {
            prompt.report(&report.to_string()).await?;
        }

        if cancellation_token.is_cancelled() {
            break;
        }

        let should_continue = prompt
            .should_continue()
            .or(async {
                cancellation_token.cancelled().await;
                Ok(false)
            })
            .await?;

        if !should_continue {
            break;
        }
    }

    Ok(())
}
