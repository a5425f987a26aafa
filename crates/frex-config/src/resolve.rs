//! Path resolution for the corpus root.
//!
//! Resolves relative and tilde-prefixed `data_dir` values to absolute paths.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a `data_dir` value to an absolute path.
///
/// Handles three cases:
/// - Tilde paths (`~/corpus`) - expanded to home directory
/// - Relative paths (`./data`, `../shared`) - resolved relative to `config_dir`
/// - Absolute paths - returned as-is
///
/// The directory is not required to exist; `frex check` reports a missing corpus.
pub fn resolve_data_dir(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(config_dir.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
