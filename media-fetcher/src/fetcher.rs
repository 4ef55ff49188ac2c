use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use yt_dlp::DownloadOptions;

use crate::bootstrap::{ensure_directory, locate_transcoder};
use crate::config::Config;
use crate::engine::Engine;
use crate::error::FetchError;
use crate::media::MediaKind;

#[derive(Debug)]
pub enum FetchOutcome {
    Completed(MediaKind),
    /// The first video attempt failed and the permissive retry succeeded.
    CompletedWithFallback,
    /// The attempt failed and the kind has no fallback.
    Abandoned { kind: MediaKind, error: FetchError }
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, FetchOutcome::Abandoned { .. })
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Completed(kind) => write!(f, "{kind} downloaded successfully."),
            FetchOutcome::CompletedWithFallback => {
                write!(f, "{} downloaded successfully.", MediaKind::Video)
            }
            FetchOutcome::Abandoned { kind, error } => {
                write!(f, "{kind} download abandoned: {error}")
            }
        }
    }
}

pub struct Fetcher<E> {
    output_dir: PathBuf,
    transcoder: PathBuf,
    engine: E
}

impl<E: Engine> Fetcher<E> {
    /// Prepares the output directory and checks ffmpeg against `PATH`.
    pub fn new(config: &Config, engine: E) -> Result<Self, FetchError> {
        Self::with_search_path(config, engine, std::env::var_os("PATH"))
    }

    pub fn with_search_path(
        config: &Config,
        engine: E,
        search_path: Option<OsString>
    ) -> Result<Self, FetchError> {
        let status = ensure_directory(&config.output_dir)?;
        tracing::info!("{}", status.notice(&config.output_dir));

        let transcoder =
            locate_transcoder(config.ffmpeg_path.as_deref(), search_path.as_deref())?;
        tracing::debug!(path = %transcoder.display(), "found ffmpeg");

        Ok(Self {
            output_dir: config.output_dir.clone(),
            transcoder,
            engine
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn transcoder(&self) -> &Path {
        &self.transcoder
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Downloads `url` as `kind`, retrying once when the kind's
    /// [`crate::FallbackPolicy`] allows it. Only a failed fallback is
    /// returned as an error.
    pub async fn fetch(&self, url: &str, kind: MediaKind) -> Result<FetchOutcome, FetchError> {
        let options = kind.options(&self.output_dir);

        let outcome = match self.engine.download(url, &options).await {
            Ok(()) => FetchOutcome::Completed(kind),
            Err(e) => {
                tracing::error!("Error downloading {}: {}", kind, e);
                match kind.fallback().options(&self.output_dir) {
                    Some(fallback) => self.fallback(url, &fallback).await?,
                    None => FetchOutcome::Abandoned {
                        kind,
                        error: FetchError::Extraction(e)
                    }
                }
            }
        };

        if outcome.is_success() {
            tracing::info!("{}", outcome);
        }

        Ok(outcome)
    }

    async fn fallback(
        &self,
        url: &str,
        options: &DownloadOptions
    ) -> Result<FetchOutcome, FetchError> {
        tracing::info!("Retrying with fallback format...");
        self.engine
            .download(url, options)
            .await
            .map_err(FetchError::Fallback)?;
        tracing::info!("Fallback MP4 download completed.");

        Ok(FetchOutcome::CompletedWithFallback)
    }
}
