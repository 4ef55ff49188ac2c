use anyhow::{bail, Context};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use media_fetcher::{Config, Fetcher, MediaKind};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_fetcher=info,yt_dlp=info".into())
        )
        .init();

    let config = Config::from_env();
    let engine = config.engine();

    match engine.check_binary().await {
        Ok(version) => tracing::info!("yt-dlp version: {}", version),
        Err(e) => tracing::warn!("yt-dlp not found or not executable: {}", e)
    }

    let fetcher = Fetcher::new(&config, engine)?;

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let url = prompt(&mut input, "Enter TikTok or YouTube URL: ").await?;
    if url.is_empty() {
        bail!("no URL entered");
    }
    let choice = prompt(&mut input, "Download as MP3 or MP4? ").await?.to_lowercase();

    fetcher.fetch(&url, MediaKind::parse(&choice)).await?;

    Ok(())
}

async fn prompt(input: &mut Lines<BufReader<Stdin>>, message: &str) -> anyhow::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(message.as_bytes()).await?;
    stdout.flush().await?;

    let line = input
        .next_line()
        .await?
        .context("stdin closed before an answer was entered")?;

    Ok(line.trim().to_string())
}
