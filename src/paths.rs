use camino::Utf8PathBuf;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutableDirError {
    #[error("Failed to determine executable path: {0}")]
    CurrentExe(#[from] io::Error),

    #[error("Executable path is not valid UTF-8: {0:?}")]
    NonUtf8(PathBuf),

    #[error("Executable path has no parent directory: {0}")]
    NoParent(Utf8PathBuf),
}

/// Directory containing the running executable.
///
/// `Config.yaml` and every item's `src_path` are resolved against this directory.
pub fn executable_dir() -> Result<Utf8PathBuf, ExecutableDirError> {
    let exe = std::env::current_exe()?;
    let exe =
        Utf8PathBuf::try_from(exe).map_err(|e| ExecutableDirError::NonUtf8(e.into_path_buf()))?;

    match exe.parent() {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Err(ExecutableDirError::NoParent(exe)),
    }
}
