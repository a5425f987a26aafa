//! Index status detection and the stored config hash.

use std::{fs, io, path::Path};

use frex_config::Config;

use crate::{
    config_hash::compute_config_hash,
    location::{config_hash_path, index_directory},
};

/// Status of the search index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    /// Index exists and matches the configuration and corpus.
    Current,
    /// Index exists but the configuration or corpus changed.
    Stale,
    /// No index exists.
    Missing,
}

impl IndexStatus {
    /// Returns a human-readable description for display.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Stale => "stale",
            Self::Missing => "missing",
        }
    }

    /// Returns true if the index must be rebuilt before searching.
    pub fn needs_update(&self) -> bool {
        !matches!(self, Self::Current)
    }
}

/// Reads the stored config hash from an index directory.
pub fn read_stored_hash(index_dir: &Path) -> Option<String> {
    fs::read_to_string(config_hash_path(index_dir))
        .ok()
        .map(|s| s.trim().to_string())
}

/// Writes the config hash to an index directory, creating it if needed.
pub fn write_config_hash(index_dir: &Path, hash: &str) -> io::Result<()> {
    fs::create_dir_all(index_dir)?;
    fs::write(config_hash_path(index_dir), hash)
}

/// Checks if a Tantivy index exists at the given path.
pub fn index_exists(index_dir: &Path) -> bool {
    index_dir.join("meta.json").exists()
}

/// Determines the status of the index for `config` and the search document file.
pub fn detect_index_status(config: &Config, search_index: &Path) -> IndexStatus {
    let Some(index_dir) = index_directory(config) else {
        return IndexStatus::Missing;
    };

    if !index_exists(&index_dir) {
        return IndexStatus::Missing;
    }

    match read_stored_hash(&index_dir) {
        Some(stored) if stored == compute_config_hash(config, search_index) => {
            IndexStatus::Current
        }
        _ => IndexStatus::Stale,
    }
}
