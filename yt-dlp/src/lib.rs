//! Async Rust wrapper for the yt-dlp CLI.
//!
//! The engine is driven as a child process: a [`DownloadOptions`] value is
//! rendered into command-line arguments, the process is spawned, and its
//! output is parsed into [`DownloadEvent`]s as it runs.
//!
//! # Example
//!
//! ```no_run
//! use tokio_stream::StreamExt;
//! use yt_dlp::{Container, DownloadOptions, OutputFormat, YtDlp};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> yt_dlp::Result<()> {
//!     let client = YtDlp::new();
//!
//!     let version = client.check_binary().await?;
//!     println!("yt-dlp version: {}", version);
//!
//!     let options = DownloadOptions::new()
//!         .format(OutputFormat::Best)
//!         .container(Container::Mp4)
//!         .output_template("downloads/%(title)s.%(ext)s")
//!         .no_playlist(true);
//!
//!     let stream = client.download_with_progress("https://example.com/video", &options);
//!     tokio::pin!(stream);
//!     while let Some(event) = stream.next().await {
//!         println!("{:?}", event?);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod command;
pub mod error;
pub mod types;

pub use client::YtDlp;
pub use error::{Error, Result};
pub use types::{
    Container, DownloadEvent, DownloadOptions, OutputFormat, PostProcessor, ProgressLine
};
