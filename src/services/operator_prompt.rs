use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, thiserror::Error)]
pub(crate) enum PromptError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DownloadRequest {
    pub(crate) destination: PathBuf,
    pub(crate) source_url: String,
}

/// Line-oriented dialogue with the operator.
pub(crate) struct OperatorPrompt<R, W> {
    reader: R,
    writer: W,
    default_destination: PathBuf,
}

impl<R, W> OperatorPrompt<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub(crate) fn new(reader: R, writer: W, default_destination: PathBuf) -> Self {
        Self {
            reader,
            writer,
            default_destination,
        }
    }

    /// Asks for a destination directory and a catalog URL. `None` means the
    /// operator is done: input ended or the URL was left empty.
    pub(crate) async fn next_request(&mut self) -> Result<Option<DownloadRequest>, PromptError> {
        let question = format!(
            "Destination directory [{}]: ",
            self.default_destination.display()
        );
        let destination = match self.ask(&question).await? {
            None => return Ok(None),
            Some(answer) if answer.is_empty() => self.default_destination.clone(),
            Some(answer) => PathBuf::from(answer),
        };

        let source_url = match self.ask("Spotify URL (track, album or playlist): ").await? {
            None => return Ok(None),
            Some(answer) if answer.is_empty() => return Ok(None),
            Some(answer) => answer,
        };

        Ok(Some(DownloadRequest {
            destination,
            source_url,
        }))
    }

    pub(crate) async fn should_continue(&mut self) -> Result<bool, PromptError> {
        let answer = self.ask("Download something else? [Y/n]: ").await?;

        Ok(match answer {
            None => false,
            Some(answer) => !matches!(answer.to_lowercase().as_str(), "n" | "no"),
        })
    }

    pub(crate) async fn report(&mut self, text: &str) -> Result<(), PromptError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;

        Ok(())
    }

    async fn ask(&mut self, question: &str) -> Result<Option<String>, PromptError> {
        self.writer.write_all(question.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();

        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }
}
