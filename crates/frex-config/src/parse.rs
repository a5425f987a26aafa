//! Configuration file parsing.
//!
//! Parses individual `.frex.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::{ConfigError, ThemeName};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// General settings section.
    pub settings: Option<RawSettings>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
    /// Dataset names section.
    pub datasets: Option<RawDatasets>,
}

/// Raw general settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    /// Corpus root, relative to the config file's directory.
    pub data_dir: Option<String>,
    /// Whether annotation highlighting is enabled.
    pub highlight: Option<bool>,
    /// Color scheme for annotation backgrounds.
    pub theme: Option<ThemeName>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Stemming language.
    pub stemmer: Option<String>,
    /// Final cap on returned hits.
    pub max_results: Option<usize>,
    /// Cap applied before enrichment.
    pub candidate_limit: Option<usize>,
    /// Maximum characters in a preview.
    pub preview_chars: Option<usize>,
    /// Maximum hits per field sub-query.
    pub per_field_limit: Option<usize>,
    /// Per-field boost overrides.
    pub boosts: Option<RawFieldBoosts>,
}

/// Raw per-field boost overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFieldBoosts {
    /// Frame name boost.
    pub frame_name: Option<f32>,
    /// Frame gloss boost.
    pub frame_gloss: Option<f32>,
    /// Frame definition boost.
    pub frame_definition: Option<f32>,
    /// Report text boost.
    pub report_text: Option<f32>,
    /// Source text boost.
    pub source_text: Option<f32>,
    /// Role names boost.
    pub roles: Option<f32>,
    /// Secondary summary boost.
    pub summary: Option<f32>,
}

/// Raw dataset directory names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDatasets {
    /// Primary examples dataset.
    pub primary: Option<String>,
    /// Secondary summaries dataset.
    pub secondary: Option<String>,
    /// Ontology dataset.
    pub ontology: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.settings.is_none());
        assert!(config.search.is_none());
        assert!(config.datasets.is_none());
        assert!(config.root.is_none());
    }

    #[test]
    fn test_parse_settings() {
        let toml = r#"
[settings]
data_dir = "./corpus"
highlight = false
theme = "dark"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let settings = config.settings.unwrap();
        assert_eq!(settings.data_dir.as_deref(), Some("./corpus"));
        assert_eq!(settings.highlight, Some(false));
        assert_eq!(settings.theme, Some(ThemeName::Dark));
    }

    #[test]
    fn test_parse_search_with_boosts() {
        let toml = r#"
[search]
stemmer = "german"
max_results = 20

[search.boosts]
frame_name = 4.0
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let search = config.search.unwrap();
        assert_eq!(search.stemmer.as_deref(), Some("german"));
        assert_eq!(search.max_results, Some(20));
        let boosts = search.boosts.unwrap();
        assert_eq!(boosts.frame_name, Some(4.0));
        assert!(boosts.roles.is_none());
    }

    #[test]
    fn test_parse_datasets() {
        let toml = r#"
[datasets]
primary = "examples"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let datasets = config.datasets.unwrap();
        assert_eq!(datasets.primary.as_deref(), Some("examples"));
        assert!(datasets.secondary.is_none());
    }

    #[test]
    fn test_parse_invalid_theme_fails() {
        let toml = r#"
[settings]
theme = "sepia"
"#;
        let err = parse_config_str(toml, Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_parse_root_flag() {
        let config = parse_config("root = true\n").unwrap();
        assert_eq!(config.root, Some(true));
    }
}
