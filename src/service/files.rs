//! Log file resolution and listing inside the configured log directory.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::error::{LogError, Result};

/// Files tried, in order, when a request names no file.
pub const DEFAULT_LOG_FILES: [&str; 2] = ["syslog", "messages"];

// == File Name Check ==
/// True when `name` is exactly one normal path component, so joining it onto
/// the log directory cannot leave that directory.
///
/// Backslashes are refused on every platform.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

// == Resolve ==
/// Maps a requested file name to a readable regular file in `log_dir`.
///
/// Without a name the first existing entry of [`DEFAULT_LOG_FILES`] is used.
///
/// # Errors
/// - [`LogError::InvalidRequest`] if the name is not a plain file name
/// - [`LogError::NotFound`] if the file is missing (the message lists what is
///   available) or is not a regular file
pub fn resolve_log_file(log_dir: &Path, file_name: Option<&str>) -> Result<PathBuf> {
    let Some(name) = file_name else {
        warn!("No file specified, defaulting to syslog or messages");
        return DEFAULT_LOG_FILES
            .iter()
            .map(|candidate| log_dir.join(candidate))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                LogError::NotFound("syslog or messages log file does not exist!".to_string())
            });
    };

    if !is_plain_file_name(name) {
        return Err(LogError::InvalidRequest(format!(
            "fileName '{}' must name a file inside the log directory",
            name
        )));
    }

    let path = log_dir.join(name);
    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => Ok(path),
        Ok(_) => Err(LogError::NotFound(format!(
            "File {} must be a valid file, not a directory!",
            name
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let available = list_log_files(log_dir)?;
            Err(LogError::NotFound(format!(
                "File not found. List of files include: {}",
                available.join(", ")
            )))
        }
        Err(err) => Err(LogError::Io(err)),
    }
}

// == List ==
/// Names of the regular files in `log_dir`, sorted, skipping hidden files
/// and `.gz` archives.
pub fn list_log_files(log_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(log_dir).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => {
            LogError::NotFound(format!("No files exist in {}!", log_dir.display()))
        }
        _ => LogError::Io(err),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name.ends_with(".gz") {
            continue;
        }
        // Follows symlinks, so a link to a log file is listed too
        if fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file()) {
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}
