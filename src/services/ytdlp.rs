use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";
const STDERR_TAIL_LINES: usize = 5;

#[derive(Debug, thiserror::Error)]
pub(crate) enum YtDlpError {
    #[error("Unable to start yt-dlp: {0}")]
    SpawnError(#[source] std::io::Error),
    #[error("yt-dlp exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("yt-dlp did not finish within {0:?}")]
    TimedOut(Duration),
}

/// Extracts MP3 audio of a single video with the `yt-dlp` executable.
pub(crate) struct YtDlp {
    executable: String,
    timeout: Duration,
    embed_thumbnail: bool,
}

impl YtDlp {
    pub(crate) fn new(executable: &str, timeout: Duration, embed_thumbnail: bool) -> Self {
        Self {
            executable: executable.to_string(),
            timeout,
            embed_thumbnail,
        }
    }

    pub(crate) fn build_args(&self, locator: &str, destination: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-x".into(),
            "--audio-format".into(),
            "mp3".into(),
            "--audio-quality".into(),
            "0".into(),
            "--no-playlist".into(),
        ];

        if self.embed_thumbnail {
            args.push("--embed-thumbnail".into());
            args.push("--add-metadata".into());
        }

        args.push("-o".into());
        args.push(destination.join(OUTPUT_TEMPLATE).into_os_string());
        args.push(locator.into());

        args
    }

    pub(crate) async fn download_audio(
        &self,
        locator: &str,
        destination: &Path,
    ) -> Result<(), YtDlpError> {
        let mut command = Command::new(&self.executable);
        command
            .args(self.build_args(locator, destination))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!(locator, destination = %destination.display(), "Running yt-dlp...");

        // The child is killed when the timeout drops the future.
        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| YtDlpError::TimedOut(self.timeout))?
            .map_err(YtDlpError::SpawnError)?;

        if !output.status.success() {
            return Err(YtDlpError::Failed {
                status: output.status.to_string(),
                stderr: stderr_tail(&output.stderr),
            });
        }

        Ok(())
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let lines = stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>();

    lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n")
}
