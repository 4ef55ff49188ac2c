//! Fetch a single video or audio track from TikTok, YouTube and the other
//! sites yt-dlp understands.
//!
//! yt-dlp does the downloading and ffmpeg does the transcoding; this crate
//! prepares the output directory, checks that ffmpeg is installed, picks
//! the engine configuration for the requested [`MediaKind`] and retries a
//! failed video download once with a permissive format.

pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod media;

pub use config::Config;
pub use engine::Engine;
pub use error::FetchError;
pub use fetcher::{FetchOutcome, Fetcher};
pub use media::{FallbackPolicy, MediaKind};
