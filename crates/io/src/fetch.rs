//! Cache-or-download for public input files.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::IoError;

/// Returns `dest` if it already holds a non-empty file, otherwise downloads
/// `url` into it.
///
/// The body is written to `<dest>.part` and renamed on success, so an
/// interrupted download never leaves a truncated cache entry. There are no
/// retries.
///
/// # Errors
///
/// Returns [`IoError::Offline`] if the file is missing and `offline` is set,
/// [`IoError::Http`] on request or status failures, or
/// [`IoError::Filesystem`] on write failures.
pub fn fetch_if_missing(url: &str, dest: &Path, offline: bool) -> Result<PathBuf, IoError> {
    if is_cached(dest) {
        debug!(path = %dest.display(), "using cached file");
        return Ok(dest.to_path_buf());
    }
    if offline {
        return Err(IoError::Offline {
            path: dest.to_path_buf(),
        });
    }

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| fs_error(parent, e))?;
    }

    info!(url, path = %dest.display(), "downloading");
    let http_error = |e: reqwest::Error| IoError::Http {
        url: url.to_string(),
        reason: e.to_string(),
    };
    let body = reqwest::blocking::get(url)
        .and_then(reqwest::blocking::Response::error_for_status)
        .and_then(|response| response.bytes())
        .map_err(http_error)?;

    let mut partial = dest.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);
    std::fs::write(&partial, &body).map_err(|e| fs_error(&partial, e))?;
    std::fs::rename(&partial, dest).map_err(|e| fs_error(dest, e))?;

    debug!(path = %dest.display(), n_bytes = body.len(), "download complete");
    Ok(dest.to_path_buf())
}

fn is_cached(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}

fn fs_error(path: &Path, e: std::io::Error) -> IoError {
    IoError::Filesystem {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
