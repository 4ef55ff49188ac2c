/// One line of the progress template yt-dlp is asked to print.
///
/// Sizes, speed and ETA are kept as yt-dlp formatted them; they are only
/// ever shown back to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressLine {
    pub percent: Option<f64>,
    pub total: Option<String>,
    pub speed: Option<String>,
    pub eta: Option<String>
}

impl ProgressLine {
    pub fn is_complete(&self) -> bool {
        self.percent.is_some_and(|p| p >= 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadEvent {
    Extracting { url: String },
    DownloadStarted { filename: String },
    Progress(ProgressLine),
    MergingFormats,
    PostProcessing { status: String },
    EmbeddingMetadata,
    EmbeddingThumbnail,
    AlreadyDownloaded { filename: String },
    Warning { message: String },
    Finished { filename: Option<String> }
}
