//! Staging path resolution
//!
//! Pure string/path transforms. The only lookups are the user's home directory
//! and the current working directory.

use std::path::{Path, PathBuf};

use crate::error::{ImportError, ImportResult};

/// Join `file_name` onto `base`, inserting a `/` only when `base` does not
/// already end with one. `option` names the setting `base` came from and is
/// reported when it is empty.
///
/// Used for both local staging paths and remote URLs.
pub fn join_base(base: &str, file_name: &str, option: &'static str) -> ImportResult<String> {
    if base.is_empty() {
        return Err(ImportError::MissingConfiguration(option));
    }

    if base.ends_with('/') {
        Ok(format!("{}{}", base, file_name))
    } else {
        Ok(format!("{}/{}", base, file_name))
    }
}

/// Expand a leading `~` to the current user's home directory.
pub fn expand_home(path: &str) -> ImportResult<PathBuf> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };

    if !rest.is_empty() && !rest.starts_with('/') {
        return Err(ImportError::PathResolutionFailed {
            path: path.to_string(),
            reason: "cannot expand user-specific home dir".to_string(),
        });
    }

    let home = dirs::home_dir().ok_or_else(|| ImportError::PathResolutionFailed {
        path: path.to_string(),
        reason: "home directory is unknown".to_string(),
    })?;

    match rest.trim_start_matches('/') {
        "" => Ok(home),
        relative => Ok(home.join(relative)),
    }
}

/// Make `path` absolute against the current working directory.
pub fn absolutize(path: &Path) -> ImportResult<PathBuf> {
    std::path::absolute(path).map_err(|e| ImportError::PathResolutionFailed {
        path: path.display().to_string(),
        reason: format!("failed to get absolute path: {}", e),
    })
}

/// Resolve the absolute local staging path for `file_name` under `local_base`.
pub fn resolve_local_path(local_base: &str, file_name: &str) -> ImportResult<PathBuf> {
    let joined = join_base(local_base, file_name, "local-path")?;
    let expanded = expand_home(&joined)?;
    absolutize(&expanded)
}
