use std::fmt;
use std::path::Path;

use yt_dlp::{Container, DownloadOptions, OutputFormat, PostProcessor};

pub const AUDIO_CODEC: &str = "mp3";
pub const AUDIO_BITRATE_KBPS: u32 = 320;
pub const VIDEO_FORMAT: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]";
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video
}

impl MediaKind {
    /// `mp3` in any case selects audio. Every other input, including an
    /// empty string or an unknown format, selects video.
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("mp3") {
            MediaKind::Audio
        } else {
            MediaKind::Video
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Audio => "MP3",
            MediaKind::Video => "MP4"
        }
    }

    pub fn fallback(self) -> FallbackPolicy {
        match self {
            MediaKind::Audio => FallbackPolicy::None,
            MediaKind::Video => FallbackPolicy::Permissive
        }
    }

    pub fn options(self, output_dir: &Path) -> DownloadOptions {
        let options = DownloadOptions::new()
            .output_template(output_template(output_dir))
            .no_playlist(true)
            .quiet(false);

        match self {
            MediaKind::Audio => options
                .format(OutputFormat::BestAudio)
                .write_thumbnail(true)
                .postprocessor(PostProcessor::extract_audio(AUDIO_CODEC, AUDIO_BITRATE_KBPS))
                .postprocessor(PostProcessor::Metadata)
                .postprocessor(PostProcessor::EmbedThumbnail),
            MediaKind::Video => options
                .format(OutputFormat::Custom(VIDEO_FORMAT.to_string()))
                .container(Container::Mp4)
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What happens after the first download attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Report the failure and stop.
    None,
    /// Retry once with any format, merged into MP4.
    Permissive
}

impl FallbackPolicy {
    pub fn options(self, output_dir: &Path) -> Option<DownloadOptions> {
        match self {
            FallbackPolicy::None => None,
            FallbackPolicy::Permissive => Some(
                DownloadOptions::new()
                    .format(OutputFormat::Best)
                    .container(Container::Mp4)
                    .output_template(output_template(output_dir))
                    .no_playlist(true)
                    .quiet(false)
            )
        }
    }
}

pub fn output_template(output_dir: &Path) -> String {
    output_dir.join(OUTPUT_TEMPLATE).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mp3_is_audio() {
        for input in ["mp3", "MP3", "Mp3", "  mp3\n"] {
            assert_eq!(MediaKind::parse(input), MediaKind::Audio, "input {input:?}");
        }
    }

    #[test]
    fn test_parse_everything_else_is_video() {
        for input in ["", "mp4", "MP4", "wav", "mp3 please", "m p 3", "🎵"] {
            assert_eq!(MediaKind::parse(input), MediaKind::Video, "input {input:?}");
        }
    }

    #[test]
    fn test_fallback_table() {
        assert_eq!(MediaKind::Audio.fallback(), FallbackPolicy::None);
        assert_eq!(MediaKind::Video.fallback(), FallbackPolicy::Permissive);
        assert!(FallbackPolicy::None.options(Path::new("downloads")).is_none());
    }

    #[test]
    fn test_audio_options() {
        let options = MediaKind::Audio.options(Path::new("downloads"));

        assert_eq!(options.format, OutputFormat::BestAudio);
        assert_eq!(options.container, Container::Default);
        assert!(options.write_thumbnail);
        assert!(options.no_playlist);
        assert!(!options.quiet);
        assert_eq!(options.postprocessors, vec![
            PostProcessor::extract_audio("mp3", 320),
            PostProcessor::Metadata,
            PostProcessor::EmbedThumbnail
        ]);
        assert_eq!(
            options.output_template.as_deref().map(Path::new),
            Some(Path::new("downloads").join("%(title)s.%(ext)s").as_path())
        );
    }

    #[test]
    fn test_video_options() {
        let options = MediaKind::Video.options(Path::new("downloads"));

        assert_eq!(options.format.as_arg().as_deref(), Some(VIDEO_FORMAT));
        assert_eq!(options.container, Container::Mp4);
        assert!(options.no_playlist);
        assert!(!options.quiet);
        assert!(!options.write_thumbnail);
        assert!(options.postprocessors.is_empty());
    }

    #[test]
    fn test_permissive_fallback_options() {
        let options = FallbackPolicy::Permissive
            .options(Path::new("downloads"))
            .unwrap();

        assert_eq!(options.format.as_arg().as_deref(), Some("best"));
        assert_eq!(options.container, Container::Mp4);
        assert!(options.no_playlist);
        assert!(!options.quiet);
        assert_eq!(options.output_template, MediaKind::Video.options(Path::new("downloads")).output_template);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(MediaKind::Audio.to_string(), "MP3");
        assert_eq!(MediaKind::Video.to_string(), "MP4");
    }
}
