use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::types::{DownloadOptions, PostProcessor};

pub(crate) const PROGRESS_TEMPLATE: &str = "download:%(progress._percent_str)s %(progress._total_bytes_str)s %(progress._speed_str)s %(progress._eta_str)s";

pub struct CommandBuilder {
    binary: PathBuf,
    args: Vec<String>
}

impl CommandBuilder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Ends option parsing so a URL starting with `-` is never read as a flag.
    pub fn url(self, url: impl Into<String>) -> Self {
        self.arg("--").arg(url)
    }

    pub fn output(self, template: impl Into<String>) -> Self {
        self.arg("-o").arg(template)
    }

    pub fn format(self, format: impl Into<String>) -> Self {
        self.arg("-f").arg(format)
    }

    pub fn merge_output_format(self, format: impl Into<String>) -> Self {
        self.arg("--merge-output-format").arg(format)
    }

    pub fn no_playlist(self) -> Self {
        self.arg("--no-playlist")
    }

    pub fn quiet(self) -> Self {
        self.arg("--quiet")
    }

    pub fn write_thumbnail(self) -> Self {
        self.arg("--write-thumbnail")
    }

    pub fn postprocessor(self, step: &PostProcessor) -> Self {
        match step {
            PostProcessor::ExtractAudio {
                codec,
                quality_kbps
            } => self
                .arg("-x")
                .arg("--audio-format")
                .arg(codec.clone())
                .arg("--audio-quality")
                .arg(format!("{quality_kbps}K")),
            PostProcessor::Metadata => self.arg("--embed-metadata"),
            PostProcessor::EmbedThumbnail => self.arg("--embed-thumbnail")
        }
    }

    pub fn cookies_file(self, path: impl AsRef<Path>) -> Self {
        self.arg("--cookies").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn cookies_file_opt(self, path: Option<&PathBuf>) -> Self {
        match path {
            Some(p) => self.cookies_file(p),
            None => self
        }
    }

    pub fn ffmpeg_location(self, path: impl AsRef<Path>) -> Self {
        self.arg("--ffmpeg-location").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn ffmpeg_location_opt(self, path: Option<&PathBuf>) -> Self {
        match path {
            Some(p) => self.ffmpeg_location(p),
            None => self
        }
    }

    pub fn progress_template(self, template: impl Into<String>) -> Self {
        self.arg("--progress-template").arg(template)
    }

    pub fn newline_progress(self) -> Self {
        self.arg("--newline")
    }

    pub fn with_options(mut self, options: &DownloadOptions) -> Self {
        if let Some(format_arg) = options.format.as_arg() {
            self = self.format(format_arg);
        }

        if let Some(container) = options.container.as_str() {
            self = self.merge_output_format(container);
        }

        if let Some(ref template) = options.output_template {
            self = self.output(template.clone());
        }

        if options.no_playlist {
            self = self.no_playlist();
        }

        if options.quiet {
            self = self.quiet();
        }

        if options.write_thumbnail {
            self = self.write_thumbnail();
        }

        for step in &options.postprocessors {
            self = self.postprocessor(step);
        }

        self
    }

    pub fn build(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args);
        cmd
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Container, OutputFormat};

    #[test]
    fn test_command_builder_basic() {
        let builder = CommandBuilder::new("yt-dlp")
            .arg("--version");
        assert_eq!(builder.get_args(), &["--version"]);
    }

    #[test]
    fn test_command_builder_video_options() {
        let options = DownloadOptions::new()
            .format(OutputFormat::Best)
            .container(Container::Mp4)
            .output_template("downloads/%(title)s.%(ext)s")
            .no_playlist(true);
        let builder = CommandBuilder::new("yt-dlp")
            .with_options(&options)
            .url("https://example.com/video");
        assert_eq!(builder.get_args(), &[
            "-f", "best",
            "--merge-output-format", "mp4",
            "-o", "downloads/%(title)s.%(ext)s",
            "--no-playlist",
            "--", "https://example.com/video"
        ]);
    }

    #[test]
    fn test_command_builder_audio_postprocessors() {
        let options = DownloadOptions::new()
            .format(OutputFormat::BestAudio)
            .write_thumbnail(true)
            .postprocessor(PostProcessor::extract_audio("mp3", 320))
            .postprocessor(PostProcessor::Metadata)
            .postprocessor(PostProcessor::EmbedThumbnail);
        let args = CommandBuilder::new("yt-dlp")
            .with_options(&options)
            .into_args();
        assert_eq!(args, vec![
            "-f", "bestaudio/best",
            "--write-thumbnail",
            "-x", "--audio-format", "mp3", "--audio-quality", "320K",
            "--embed-metadata",
            "--embed-thumbnail"
        ]);
    }

    #[test]
    fn test_command_builder_quiet_with_global_args() {
        let options = DownloadOptions::new().quiet(true);
        let builder = CommandBuilder::new("yt-dlp")
            .args(["--extractor-args", "youtube:player-client=mweb"])
            .with_options(&options);
        assert_eq!(builder.get_args(), &[
            "--extractor-args",
            "youtube:player-client=mweb",
            "--quiet"
        ]);
    }

    #[test]
    fn test_command_builder_url_after_separator() {
        let builder = CommandBuilder::new("yt-dlp")
            .no_playlist()
            .url("--version");
        assert_eq!(builder.get_args(), &["--no-playlist", "--", "--version"]);
    }

    #[test]
    fn test_command_builder_optional_paths() {
        let cookies = Some(PathBuf::from("/tmp/cookies.txt"));
        let builder = CommandBuilder::new("yt-dlp")
            .cookies_file_opt(cookies.as_ref())
            .ffmpeg_location_opt(None);
        assert_eq!(builder.get_args(), &["--cookies", "/tmp/cookies.txt"]);

        let ffmpeg = Some(PathBuf::from("/usr/local/bin/ffmpeg"));
        let builder = CommandBuilder::new("yt-dlp")
            .cookies_file_opt(None)
            .ffmpeg_location_opt(ffmpeg.as_ref());
        assert_eq!(builder.get_args(), &["--ffmpeg-location", "/usr/local/bin/ffmpeg"]);
    }
}
