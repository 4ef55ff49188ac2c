use std::future::Future;

use tokio_stream::StreamExt;
use yt_dlp::{DownloadEvent, DownloadOptions, YtDlp};

/// Something that can run one download to completion.
pub trait Engine {
    fn download(
        &self,
        url: &str,
        options: &DownloadOptions
    ) -> impl Future<Output = yt_dlp::Result<()>>;
}

impl Engine for YtDlp {
    async fn download(&self, url: &str, options: &DownloadOptions) -> yt_dlp::Result<()> {
        let mut stream = self.download_with_progress(url, options);

        while let Some(event) = stream.next().await {
            report(&event?);
        }

        Ok(())
    }
}

fn report(event: &DownloadEvent) {
    match event {
        DownloadEvent::Extracting { url } => tracing::info!("Extracting {}", url),
        DownloadEvent::DownloadStarted { filename } => {
            tracing::info!("Downloading to {}", filename);
        }
        DownloadEvent::Progress(progress) => {
            tracing::debug!(
                percent = progress.percent,
                total = progress.total.as_deref(),
                speed = progress.speed.as_deref(),
                eta = progress.eta.as_deref(),
                "progress"
            );
            if progress.is_complete() {
                tracing::info!(
                    "Downloaded {}",
                    progress.total.as_deref().unwrap_or("unknown size")
                );
            }
        }
        DownloadEvent::MergingFormats => tracing::info!("Merging formats"),
        DownloadEvent::PostProcessing { status } => tracing::info!("{}", status),
        DownloadEvent::EmbeddingMetadata => tracing::info!("Writing metadata"),
        DownloadEvent::EmbeddingThumbnail => tracing::info!("Embedding thumbnail"),
        DownloadEvent::AlreadyDownloaded { filename } => {
            tracing::info!("{} has already been downloaded", filename);
        }
        DownloadEvent::Warning { message } => tracing::warn!("yt-dlp: {}", message),
        DownloadEvent::Finished { filename } => match filename {
            Some(name) => tracing::info!("Saved {}", name),
            None => tracing::info!("yt-dlp finished")
        }
    }
}
