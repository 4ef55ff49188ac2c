use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;

use futures_core::Stream;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::SplitStream;

use crate::command::{CommandBuilder, PROGRESS_TEMPLATE};
use crate::error::{Error, Result};
use crate::types::{DownloadEvent, DownloadOptions, ProgressLine};

const STDERR_TAIL_LINES: usize = 5;

#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    cookies_file: Option<PathBuf>,
    extra_args: Vec<String>,
    ffmpeg_location: Option<PathBuf>
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlp {
    pub fn new() -> Self {
        Self::with_binary("yt-dlp")
    }

    pub fn with_binary(path: impl Into<PathBuf>) -> Self {
        Self {
            binary: path.into(),
            cookies_file: None,
            extra_args: Vec::new(),
            ffmpeg_location: None
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn set_cookies_file(&mut self, path: Option<PathBuf>) {
        self.cookies_file = path;
    }

    pub fn set_extra_args(&mut self, args: Vec<String>) {
        self.extra_args = args;
    }

    pub fn set_ffmpeg_location(&mut self, path: Option<PathBuf>) {
        self.ffmpeg_location = path;
    }

    pub async fn check_binary(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .await?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Error::BinaryNotExecutable(self.binary.clone()))
        }
    }

    /// Arguments yt-dlp would be started with for this download.
    pub fn command_for(&self, url: &str, options: &DownloadOptions) -> Vec<String> {
        self.download_command(url, options).into_args()
    }

    /// Runs one download, yielding events parsed from yt-dlp's output.
    ///
    /// The stream ends with [`DownloadEvent::Finished`] when the process
    /// exits cleanly, or with [`Error::CommandFailed`] otherwise.
    pub fn download_with_progress(
        &self,
        url: &str,
        options: &DownloadOptions
    ) -> Pin<Box<dyn Stream<Item = Result<DownloadEvent>> + Send + 'static>> {
        let url = url.to_string();
        let binary = self.binary.clone();
        let builder = self.download_command(&url, options);

        Box::pin(async_stream::try_stream! {
            yield DownloadEvent::Extracting { url: url.clone() };

            tracing::debug!(
                binary = %binary.display(),
                args = ?builder.get_args(),
                "spawning yt-dlp"
            );

            let mut cmd = builder.build();
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
            cmd.kill_on_drop(true);

            let mut child = cmd.spawn()?;

            let stdout = child.stdout.take().ok_or_else(|| pipe_missing("stdout"))?;
            let stderr = child.stderr.take().ok_or_else(|| pipe_missing("stderr"))?;

            let mut output = SplitStream::new(BufReader::new(stdout).split(b'\n'))
                .map(Pipe::Stdout)
                .merge(SplitStream::new(BufReader::new(stderr).split(b'\n')).map(Pipe::Stderr));

            let mut current_filename: Option<String> = None;
            let mut last_error: Option<String> = None;
            let mut stderr_tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);

            while let Some(pipe) = output.next().await {
                match pipe {
                    Pipe::Stdout(line) => {
                        let line = decode_line(&line?);
                        tracing::trace!(line = %line, "yt-dlp stdout");
                        if let Some(event) = parse_output_line(&line, &mut current_filename) {
                            yield event;
                        }
                    }
                    Pipe::Stderr(line) => {
                        let line = decode_line(&line?);
                        tracing::trace!(line = %line, "yt-dlp stderr");
                        if let Some(message) = line.trim().strip_prefix("ERROR:") {
                            last_error = Some(message.trim().to_string());
                        } else if let Some(event) = parse_output_line(&line, &mut current_filename) {
                            yield event;
                        } else if !line.trim().is_empty() {
                            if stderr_tail.len() == STDERR_TAIL_LINES {
                                stderr_tail.pop_front();
                            }
                            stderr_tail.push_back(line);
                        }
                    }
                }
            }

            let status = child.wait().await?;

            if !status.success() {
                let stderr = last_error
                    .unwrap_or_else(|| Vec::from(stderr_tail).join("\n"));
                Err::<(), Error>(Error::CommandFailed {
                    code: status.code().unwrap_or(-1),
                    stderr
                })?;
            }

            yield DownloadEvent::Finished { filename: current_filename };
        })
    }

    fn download_command(&self, url: &str, options: &DownloadOptions) -> CommandBuilder {
        CommandBuilder::new(&self.binary)
            .cookies_file_opt(self.cookies_file.as_ref())
            .args(self.extra_args.iter().map(String::as_str))
            .ffmpeg_location_opt(self.ffmpeg_location.as_ref())
            .with_options(options)
            .newline_progress()
            .progress_template(PROGRESS_TEMPLATE)
            .url(url)
    }
}

enum Pipe {
    Stdout(std::io::Result<Vec<u8>>),
    Stderr(std::io::Result<Vec<u8>>)
}

/// yt-dlp writes titles in the locale's encoding, which need not be UTF-8.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

fn pipe_missing(name: &str) -> Error {
    Error::ExecutionFailed(std::io::Error::other(format!("{name} not captured")))
}

fn parse_output_line(line: &str, current_filename: &mut Option<String>) -> Option<DownloadEvent> {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix("download:") {
        return Some(DownloadEvent::Progress(parse_progress(rest)));
    }

    if let Some(filename) = line.strip_prefix("[download] Destination:") {
        let filename = filename.trim().to_string();
        *current_filename = Some(filename.clone());
        return Some(DownloadEvent::DownloadStarted { filename });
    }

    if line.starts_with("[download]") && line.ends_with("has already been downloaded") {
        let filename = line
            .trim_start_matches("[download]")
            .trim_end_matches("has already been downloaded")
            .trim()
            .to_string();
        *current_filename = Some(filename.clone());
        return Some(DownloadEvent::AlreadyDownloaded { filename });
    }

    if line.starts_with("[Merger]") {
        if let Some(filename) = quoted(line) {
            *current_filename = Some(filename.to_string());
        }
        return Some(DownloadEvent::MergingFormats);
    }

    if line.starts_with("[ExtractAudio]") {
        if let Some(filename) = line.strip_prefix("[ExtractAudio] Destination:") {
            *current_filename = Some(filename.trim().to_string());
        }
        return Some(DownloadEvent::PostProcessing {
            status: line.to_string()
        });
    }

    if line.starts_with("[Metadata]") {
        return Some(DownloadEvent::EmbeddingMetadata);
    }

    if line.starts_with("[EmbedThumbnail]") {
        return Some(DownloadEvent::EmbeddingThumbnail);
    }

    if let Some(message) = line.strip_prefix("WARNING:") {
        return Some(DownloadEvent::Warning {
            message: message.trim().to_string()
        });
    }

    None
}

fn parse_progress(content: &str) -> ProgressLine {
    let mut parts = content.split_whitespace();

    let percent = parts
        .next()
        .and_then(|p| p.trim_end_matches('%').parse::<f64>().ok());
    let mut field = || {
        parts
            .next()
            .filter(|s| !matches!(*s, "N/A" | "NA" | "Unknown"))
            .map(str::to_string)
    };
    let total = field();
    let speed = field();
    let eta = field();

    ProgressLine {
        percent,
        total,
        speed,
        eta
    }
}

fn quoted(line: &str) -> Option<&str> {
    let start = line.find('"')?;
    let end = line.rfind('"')?;
    (end > start).then(|| &line[start + 1..end])
}
