use std::path::PathBuf;

use yt_dlp::YtDlp;

pub const DEFAULT_OUTPUT_DIR: &str = "downloads";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub output_dir: PathBuf,
    pub ytdlp_path: Option<PathBuf>,
    pub ffmpeg_path: Option<PathBuf>,
    pub cookies_file: Option<PathBuf>,
    pub extractor_args: String
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            ytdlp_path: None,
            ffmpeg_path: None,
            cookies_file: None,
            extractor_args: String::new()
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            output_dir: get("DOWNLOAD_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from),
            ytdlp_path: get("YTDLP_PATH").map(PathBuf::from),
            ffmpeg_path: get("FFMPEG_PATH").map(PathBuf::from),
            cookies_file: get("COOKIES_FILE").map(PathBuf::from),
            extractor_args: get("YTDLP_EXTRACTOR_ARGS").unwrap_or_default()
        }
    }

    /// A yt-dlp client carrying every engine-wide setting.
    pub fn engine(&self) -> YtDlp {
        let mut yt_dlp = match self.ytdlp_path {
            Some(ref path) => {
                tracing::info!("Using custom yt-dlp path: {}", path.display());
                YtDlp::with_binary(path)
            }
            None => YtDlp::new()
        };

        let parsed = parse_extractor_args(&self.extractor_args);
        if !parsed.is_empty() {
            yt_dlp.set_extra_args(parsed);
        }

        if let Some(ref path) = self.cookies_file {
            if path.exists() {
                yt_dlp.set_cookies_file(Some(path.clone()));
                tracing::info!("Using cookies file: {}", path.display());
            } else {
                tracing::warn!("Cookies file {} does not exist, ignoring", path.display());
            }
        }

        if let Some(ref path) = self.ffmpeg_path {
            yt_dlp.set_ffmpeg_location(Some(path.clone()));
            tracing::info!("Using custom ffmpeg path: {}", path.display());
        }

        yt_dlp
    }
}

/// Joins extractor args given one per line or `;`-separated into a single
/// `--extractor-args` pair.
pub fn parse_extractor_args(input: &str) -> Vec<String> {
    let joined: Vec<&str> = input
        .split(['\n', ';'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if joined.is_empty() {
        return Vec::new();
    }
    vec![
        "--extractor-args".to_string(),
        joined.join(";")
    ]
}
