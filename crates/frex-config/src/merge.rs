//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving the corpus root.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, DatasetSettings, FieldBoosts, SearchSettings, Settings,
    parse::{RawConfig, RawDatasets, RawFieldBoosts, RawSearchSettings, RawSettings},
    resolve::resolve_data_dir,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). Every scalar takes the first defined value.
/// `data_dir` is resolved relative to the file that defines it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let settings = merge_settings(configs)?;
    let search = merge_search_settings(configs);
    let datasets = merge_datasets(configs);
    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        settings,
        search,
        datasets,
        config_root,
    })
}

/// Merges general settings, taking first defined value for each field.
fn merge_settings(configs: &[ParsedConfig]) -> Result<Settings, ConfigError> {
    let mut result = Settings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref settings) = parsed.config.settings {
            apply_raw_settings(&mut result, settings, parsed.dir())?;
        }
    }

    Ok(result)
}

/// Applies raw settings to result, overwriting any present values.
fn apply_raw_settings(
    result: &mut Settings,
    raw: &RawSettings,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.data_dir {
        result.data_dir = resolve_data_dir(v, config_dir)?;
    }
    if let Some(v) = raw.highlight {
        result.highlight = v;
    }
    if let Some(v) = raw.theme {
        result.theme = v;
    }
    Ok(())
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(ref v) = raw.stemmer {
        result.stemmer = v.clone();
    }
    if let Some(v) = raw.max_results {
        result.max_results = v;
    }
    if let Some(v) = raw.candidate_limit {
        result.candidate_limit = v;
    }
    if let Some(v) = raw.preview_chars {
        result.preview_chars = v;
    }
    if let Some(v) = raw.per_field_limit {
        result.per_field_limit = v;
    }
    if let Some(ref boosts) = raw.boosts {
        apply_raw_boosts(&mut result.boosts, boosts);
    }
}

/// Applies raw boost overrides field by field.
fn apply_raw_boosts(result: &mut FieldBoosts, raw: &RawFieldBoosts) {
    let overrides = [
        (&mut result.frame_name, raw.frame_name),
        (&mut result.frame_gloss, raw.frame_gloss),
        (&mut result.frame_definition, raw.frame_definition),
        (&mut result.report_text, raw.report_text),
        (&mut result.source_text, raw.source_text),
        (&mut result.roles, raw.roles),
        (&mut result.summary, raw.summary),
    ];
    for (slot, value) in overrides {
        if let Some(v) = value {
            *slot = v;
        }
    }
}

/// Merges dataset names.
fn merge_datasets(configs: &[ParsedConfig]) -> DatasetSettings {
    let mut result = DatasetSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref datasets) = parsed.config.datasets {
            apply_raw_datasets(&mut result, datasets);
        }
    }

    result
}

/// Applies raw dataset names to result.
fn apply_raw_datasets(result: &mut DatasetSettings, raw: &RawDatasets) {
    if let Some(ref v) = raw.primary {
        result.primary = v.clone();
    }
    if let Some(ref v) = raw.secondary {
        result.secondary = v.clone();
    }
    if let Some(ref v) = raw.ontology {
        result.ontology = v.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ThemeName, parse::parse_config_str, test_support::TestDir};

    fn parsed(dir: &Path, contents: &str) -> ParsedConfig {
        ParsedConfig {
            path: dir.join(".frex.toml"),
            config: parse_config_str(contents, Path::new("test")).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty_configs() {
        let result = merge_configs(&[]).unwrap();
        assert_eq!(result.search.max_results, 50);
        assert!(result.config_root.is_none());
    }

    #[test]
    fn test_merge_single_config_resolves_data_dir() {
        let test_dir = TestDir::new();
        let config = parsed(
            test_dir.path(),
            r#"
[settings]
data_dir = "corpus"
theme = "dark"
"#,
        );

        let result = merge_configs(&[config]).unwrap();
        assert_eq!(result.settings.data_dir, test_dir.path().join("corpus"));
        assert_eq!(result.settings.theme, ThemeName::Dark);
        assert_eq!(result.config_root.as_deref(), Some(test_dir.path()));
    }

    #[test]
    fn test_higher_precedence_wins() {
        let test_dir = TestDir::new();
        let project = test_dir.create_dir("project");
        let local = parsed(
            &project,
            r#"
[search]
max_results = 10

[search.boosts]
roles = 7.5
"#,
        );
        let global = parsed(
            test_dir.path(),
            r#"
[settings]
data_dir = "shared"

[search]
max_results = 30
stemmer = "french"

[search.boosts]
roles = 1.0
summary = 4.0
"#,
        );

        let result = merge_configs(&[local, global]).unwrap();
        assert_eq!(result.search.max_results, 10);
        assert_eq!(result.search.stemmer, "french");
        assert!((result.search.boosts.roles - 7.5).abs() < f32::EPSILON);
        assert!((result.search.boosts.summary - 4.0).abs() < f32::EPSILON);
        assert_eq!(result.settings.data_dir, test_dir.path().join("shared"));
        assert_eq!(result.config_root.as_deref(), Some(project.as_path()));
    }

    #[test]
    fn test_dataset_overrides() {
        let test_dir = TestDir::new();
        let config = parsed(
            test_dir.path(),
            r#"
[datasets]
secondary = "summaries"
"#,
        );

        let result = merge_configs(&[config]).unwrap();
        assert_eq!(result.datasets.primary, "famus");
        assert_eq!(result.datasets.secondary, "summaries");
    }
}
