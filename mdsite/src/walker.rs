//! Directory walker for copying static assets into the output tree

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors that can occur while copying static assets
#[derive(Debug)]
pub enum WalkerError {
    /// IO error
    Io(std::io::Error),
    /// Source directory does not exist or is not a directory
    MissingSource(PathBuf),
}

impl From<std::io::Error> for WalkerError {
    fn from(err: std::io::Error) -> Self {
        WalkerError::Io(err)
    }
}

impl From<walkdir::Error> for WalkerError {
    fn from(err: walkdir::Error) -> Self {
        WalkerError::Io(std::io::Error::other(err))
    }
}

impl std::fmt::Display for WalkerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalkerError::Io(e) => write!(f, "IO error: {}", e),
            WalkerError::MissingSource(path) => {
                write!(f, "Static directory does not exist: {}", path.display())
            }
        }
    }
}

impl std::error::Error for WalkerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WalkerError::Io(e) => Some(e),
            WalkerError::MissingSource(_) => None,
        }
    }
}

/// Replace `dst` with a recursive copy of `src`
///
/// `dst` is deleted first if it exists, so files from a previous build never
/// linger in the output.
///
/// # Parameters
/// * `src` - Directory to copy from
/// * `dst` - Directory to create
///
/// # Returns
/// * `Ok(usize)` - Number of files copied
/// * `Err(WalkerError)` - `src` is not a directory, or an IO operation failed
pub fn copy_static(src: &Path, dst: &Path) -> Result<usize, WalkerError> {
    if !src.is_dir() {
        return Err(WalkerError::MissingSource(src.to_path_buf()));
    }

    if dst.exists() {
        log::debug!("{} exists, deleting", dst.display());
        fs::remove_dir_all(dst)?;
    }
    log::debug!("Creating {}", dst.display());
    fs::create_dir_all(dst)?;

    let mut copied = 0;

    for entry in WalkDir::new(src).min_depth(1).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            log::debug!("Creating directory {}", target.display());
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            log::debug!("Copying {} to {}", entry.path().display(), target.display());
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    log::info!("Copied {} static files to {}", copied, dst.display());
    Ok(copied)
}
