//! Configuration hash computation for index versioning.
//!
//! The index stores a hash of everything that determines its contents. A different hash means
//! the index must be rebuilt. The hash covers:
//! - the schema version (bumped when field definitions change)
//! - the stemmer language
//! - size and modification time of the search document file

use std::{
    fs,
    hash::{Hash, Hasher},
    path::Path,
    time::UNIX_EPOCH,
};

use frex_config::Config;
use siphasher::sip::SipHasher24;

/// Current schema version. Bump this when index field definitions change.
pub const SCHEMA_VERSION: u32 = 1;

/// Settings and inputs that determine the index contents.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct IndexingConfig {
    /// Schema version.
    pub schema_version: u32,
    /// Stemmer language for text analysis.
    pub stemmer: String,
    /// Size of the search document file in bytes, 0 if unreadable.
    pub source_len: u64,
    /// Modification time of the search document file in seconds, 0 if unknown.
    pub source_mtime: u64,
}

impl IndexingConfig {
    /// Collects the indexing inputs for `config` and the search document file.
    pub fn from_config(config: &Config, search_index: &Path) -> Self {
        let metadata = fs::metadata(search_index).ok();
        let source_len = metadata.as_ref().map(fs::Metadata::len).unwrap_or_default();
        let source_mtime = metadata
            .and_then(|m| m.modified().ok())
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or_default();

        Self {
            schema_version: SCHEMA_VERSION,
            stemmer: config.search.stemmer.to_lowercase(),
            source_len,
            source_mtime,
        }
    }

    /// Computes the hash of the indexing inputs.
    pub fn compute_hash(&self) -> u64 {
        let mut hasher = SipHasher24::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// The hash as a hex string.
    pub fn hash_string(&self) -> String {
        format!("{:016x}", self.compute_hash())
    }
}

/// Computes the config hash for `config` and the search document file.
pub fn compute_config_hash(config: &Config, search_index: &Path) -> String {
    IndexingConfig::from_config(config, search_index).hash_string()
}

#[cfg(test)]
mod test {
    use std::fs;

    use frex_config::SearchSettings;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn same_inputs_same_hash() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("search_index.json");
        fs::write(&file, "[]").unwrap();

        let config = Config::default();
        assert_eq!(
            compute_config_hash(&config, &file),
            compute_config_hash(&config, &file)
        );
    }

    #[test]
    fn stemmer_changes_hash() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("search_index.json");
        let french = Config {
            search: SearchSettings {
                stemmer: "french".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_ne!(
            compute_config_hash(&Config::default(), &file),
            compute_config_hash(&french, &file)
        );
    }

    #[test]
    fn source_size_changes_hash() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("search_index.json");
        let config = Config::default();

        fs::write(&file, "[]").unwrap();
        let before = compute_config_hash(&config, &file);
        fs::write(&file, "[{\"id\": 0}]").unwrap();
        assert_ne!(before, compute_config_hash(&config, &file));
    }

    #[test]
    fn missing_source_still_hashes() {
        let temp = TempDir::new().unwrap();
        let indexing = IndexingConfig::from_config(&Config::default(), &temp.path().join("none"));
        assert_eq!(indexing.source_len, 0);
        assert_eq!(indexing.source_mtime, 0);

        let hash = indexing.hash_string();
        assert_eq!(hash.len(), 16);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
