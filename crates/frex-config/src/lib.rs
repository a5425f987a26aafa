//! Configuration system for frex.
//!
//! frex uses TOML configuration files named `.frex.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.frex.toml` files
//! found, then loading `~/.frex.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawDatasets, RawFieldBoosts, RawSearchSettings, RawSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_data_dir;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for frex.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.frex.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// General settings.
    pub settings: Settings,
    /// Search-related settings.
    pub search: SearchSettings,
    /// Dataset directory names inside the corpus root.
    pub datasets: DatasetSettings,
    /// Directory containing the most specific config file (determines index location).
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.frex.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Returns the corpus root, resolving a relative `data_dir` against `cwd`.
    ///
    /// A relative path only survives merging when no config file set it, so `cwd` is the
    /// natural anchor.
    pub fn data_dir(&self, cwd: &Path) -> PathBuf {
        if self.settings.data_dir.is_absolute() {
            self.settings.data_dir.clone()
        } else {
            cwd.join(&self.settings.data_dir)
        }
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - A corpus root that doesn't exist or isn't a directory
    /// - Dataset directories missing from the corpus root
    /// - Non-positive field boosts
    /// - A candidate limit smaller than the result cap
    pub fn validate(&self, cwd: &Path) -> Vec<ConfigWarning> {
        validate_config(self, cwd)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            settings: self.settings.clone(),
            search: self.search.clone(),
            datasets: self.datasets.clone(),
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Color scheme used when rendering annotations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light backgrounds.
    #[default]
    Light,
    /// Dark backgrounds.
    Dark,
}

/// General settings for frex.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Corpus root containing the dataset directories.
    pub data_dir: PathBuf,
    /// Whether annotation highlighting is enabled.
    pub highlight: bool,
    /// Color scheme for annotation backgrounds.
    pub theme: ThemeName,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            highlight: true,
            theme: ThemeName::Light,
        }
    }
}

/// Search-related settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Stemming language for the text analyzer.
    pub stemmer: String,
    /// Final cap on returned hits.
    pub max_results: usize,
    /// Cap applied after deduplication and before enrichment.
    pub candidate_limit: usize,
    /// Maximum characters in an enrichment preview.
    pub preview_chars: usize,
    /// Maximum hits requested from each field sub-query.
    pub per_field_limit: usize,
    /// Per-field boost weights.
    pub boosts: FieldBoosts,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            stemmer: String::from("english"),
            max_results: 50,
            candidate_limit: 100,
            preview_chars: 200,
            per_field_limit: 100,
            boosts: FieldBoosts::default(),
        }
    }
}

/// Per-field boost weights applied to index scores.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldBoosts {
    /// Frame name boost.
    pub frame_name: f32,
    /// Frame gloss boost.
    pub frame_gloss: f32,
    /// Frame definition boost.
    pub frame_definition: f32,
    /// Report document text boost.
    pub report_text: f32,
    /// Source document text boost.
    pub source_text: f32,
    /// Annotated role names boost.
    pub roles: f32,
    /// Secondary summary text boost.
    pub summary: f32,
}

impl Default for FieldBoosts {
    fn default() -> Self {
        Self {
            frame_name: 10.0,
            frame_gloss: 5.0,
            frame_definition: 2.0,
            report_text: 1.0,
            source_text: 1.0,
            roles: 3.0,
            summary: 2.0,
        }
    }
}

impl FieldBoosts {
    /// Returns `(field name, boost)` pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, f32); 7] {
        [
            ("frame_name", self.frame_name),
            ("frame_gloss", self.frame_gloss),
            ("frame_definition", self.frame_definition),
            ("report_text", self.report_text),
            ("source_text", self.source_text),
            ("roles", self.roles),
            ("summary", self.summary),
        ]
    }
}

/// Names of the dataset directories inside the corpus root.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Primary annotated examples.
    pub primary: String,
    /// Secondary summaries cross-referenced by instance id.
    pub secondary: String,
    /// Frame ontology.
    pub ontology: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            primary: String::from("famus"),
            secondary: String::from("seamus"),
            ontology: String::from("ontology"),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// General settings.
    settings: Settings,
    /// Search-related settings.
    search: SearchSettings,
    /// Dataset names.
    datasets: DatasetSettings,
}
