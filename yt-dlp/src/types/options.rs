/// Format selector passed to `-f`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Default,
    Best,
    BestAudio,
    Custom(String)
}

impl OutputFormat {
    pub fn as_arg(&self) -> Option<String> {
        match self {
            OutputFormat::Default => None,
            OutputFormat::Best => Some("best".to_string()),
            OutputFormat::BestAudio => Some("bestaudio/best".to_string()),
            OutputFormat::Custom(s) => Some(s.clone())
        }
    }
}

/// Container the downloaded streams are merged into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Container {
    #[default]
    Default,
    Mp4
}

impl Container {
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Container::Default => None,
            Container::Mp4 => Some("mp4")
        }
    }
}

/// A post-processing step run by yt-dlp through ffmpeg once the download
/// finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcessor {
    /// Transcode to an audio-only file. `quality_kbps` is a constant bitrate.
    ExtractAudio { codec: String, quality_kbps: u32 },
    /// Write title, artist and friends into the container's tags.
    Metadata,
    /// Embed the fetched thumbnail as cover art.
    EmbedThumbnail
}

impl PostProcessor {
    pub fn extract_audio(codec: impl Into<String>, quality_kbps: u32) -> Self {
        PostProcessor::ExtractAudio {
            codec: codec.into(),
            quality_kbps
        }
    }

    /// The name yt-dlp uses for this step in its own output and API.
    pub fn key(&self) -> &'static str {
        match self {
            PostProcessor::ExtractAudio { .. } => "FFmpegExtractAudio",
            PostProcessor::Metadata => "FFmpegMetadata",
            PostProcessor::EmbedThumbnail => "EmbedThumbnail"
        }
    }
}

/// Everything yt-dlp needs to know about a single download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    pub format: OutputFormat,
    pub container: Container,
    pub output_template: Option<String>,
    pub no_playlist: bool,
    pub quiet: bool,
    pub write_thumbnail: bool,
    pub postprocessors: Vec<PostProcessor>
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    pub fn output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = Some(template.into());
        self
    }

    pub fn no_playlist(mut self, single: bool) -> Self {
        self.no_playlist = single;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn write_thumbnail(mut self, write: bool) -> Self {
        self.write_thumbnail = write;
        self
    }

    /// Appends a step; steps run in the order they were added.
    pub fn postprocessor(mut self, step: PostProcessor) -> Self {
        self.postprocessors.push(step);
        self
    }

    pub fn postprocessor_keys(&self) -> Vec<&'static str> {
        self.postprocessors.iter().map(PostProcessor::key).collect()
    }
}
