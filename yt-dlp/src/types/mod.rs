mod options;
mod progress;

pub use options::{Container, DownloadOptions, OutputFormat, PostProcessor};
pub use progress::{DownloadEvent, ProgressLine};
