//! Index location resolution.
//!
//! The index lives in `.frex/index/` under the directory containing the most specific
//! `.frex.toml`. Without any config file there is no index.

use std::path::{Path, PathBuf};

use frex_config::{CONFIG_FILENAME, Config};

/// Directory name for frex data (sibling to .frex.toml).
const FREX_DIR: &str = ".frex";
/// Subdirectory within .frex for the index.
const INDEX_DIR: &str = "index";

/// Computes the index directory from the configuration, if a config file was found.
pub fn index_directory(config: &Config) -> Option<PathBuf> {
    config.config_root.as_ref().map(|config_root| {
        let root_dir = match config_root.file_name() {
            Some(name) if name == CONFIG_FILENAME => {
                config_root.parent().unwrap_or(config_root.as_path())
            }
            _ => config_root.as_path(),
        };
        root_dir.join(FREX_DIR).join(INDEX_DIR)
    })
}

/// Path of the config hash file inside an index directory.
pub fn config_hash_path(index_dir: &Path) -> PathBuf {
    index_dir.join("config_hash")
}

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn index_directory_beside_config() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            config_root: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(
            index_directory(&config).unwrap(),
            temp.path().join(".frex").join("index")
        );
    }

    #[test]
    fn index_directory_accepts_config_file_path() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            config_root: Some(temp.path().join(CONFIG_FILENAME)),
            ..Default::default()
        };
        assert_eq!(
            index_directory(&config).unwrap(),
            temp.path().join(".frex").join("index")
        );
    }

    #[test]
    fn no_index_without_config() {
        assert!(index_directory(&Config::default()).is_none());
    }

    #[test]
    fn config_hash_path_in_index_dir() {
        let index_dir = PathBuf::from("/corpus/.frex/index");
        assert_eq!(
            config_hash_path(&index_dir),
            PathBuf::from("/corpus/.frex/index/config_hash")
        );
    }
}
