use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{binary} is not installed. Install with:\n  {hint}")]
    MissingDependency { binary: String, hint: &'static str },

    #[error("output directory {} is unusable: {source}", .path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error
    },

    #[error("extraction failed: {0}")]
    Extraction(yt_dlp::Error),

    #[error("fallback download failed: {0}")]
    Fallback(yt_dlp::Error)
}

impl FetchError {
    pub fn directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Directory {
            path: path.into(),
            source
        }
    }
}
