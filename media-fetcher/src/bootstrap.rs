//! Startup checks that must pass before any download runs.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FetchError;

pub const TRANSCODER: &str = "ffmpeg";

#[cfg(target_os = "macos")]
const INSTALL_HINT: &str = "brew install ffmpeg";
#[cfg(windows)]
const INSTALL_HINT: &str = "winget install ffmpeg";
#[cfg(not(any(target_os = "macos", windows)))]
const INSTALL_HINT: &str = "sudo apt install ffmpeg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryStatus {
    Created,
    AlreadyExists
}

impl DirectoryStatus {
    pub fn notice(self, path: &Path) -> String {
        match self {
            DirectoryStatus::Created => format!("Directory created at {}.", path.display()),
            DirectoryStatus::AlreadyExists => {
                format!("Directory already exists at {}.", path.display())
            }
        }
    }
}

/// Creates `path` and any missing parents. An existing directory is left
/// untouched, but this process must be able to create files in it.
pub fn ensure_directory(path: &Path) -> Result<DirectoryStatus, FetchError> {
    let status = if path.is_dir() {
        DirectoryStatus::AlreadyExists
    } else {
        fs::create_dir_all(path).map_err(|e| FetchError::directory(path, e))?;
        DirectoryStatus::Created
    };

    // Unlinked on drop.
    tempfile::tempfile_in(path).map_err(|e| FetchError::directory(path, e))?;

    Ok(status)
}

/// Finds ffmpeg. An explicit path only has to exist; otherwise `ffmpeg` is
/// looked up in `search_path` the way a shell would.
pub fn locate_transcoder(
    explicit: Option<&Path>,
    search_path: Option<&OsStr>
) -> Result<PathBuf, FetchError> {
    let found = match explicit {
        Some(path) => path.is_file().then(|| path.to_path_buf()),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            search_path.and_then(|paths| which::which_in(TRANSCODER, Some(paths), cwd).ok())
        }
    };

    found.ok_or_else(|| FetchError::MissingDependency {
        binary: TRANSCODER.to_string(),
        hint: INSTALL_HINT
    })
}
