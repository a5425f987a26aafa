//! Configuration templates for `frex init`.
//!
//! Templates are stored as valid TOML files and returned as commented-out
//! example configurations.

/// Default local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty
/// lines get a "# " prefix. Empty lines are preserved.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DatasetSettings, SearchSettings, Settings, parse::parse_config};

    #[test]
    fn local_template_parses_as_valid_toml() {
        let result = parse_config(LOCAL_TEMPLATE);
        assert!(result.is_ok(), "local template failed to parse: {result:?}");
    }

    #[test]
    fn global_template_parses_as_valid_toml() {
        let result = parse_config(GLOBAL_TEMPLATE);
        assert!(
            result.is_ok(),
            "global template failed to parse: {result:?}"
        );
    }

    #[test]
    fn comment_template_preserves_existing_comments() {
        let input = "# This is a comment\nkey = \"value\"\n\n";
        let output = comment_template(input);
        assert_eq!(output, "# This is a comment\n# key = \"value\"\n\n");
    }

    #[test]
    fn commented_template_parses_as_empty_config() {
        let config = parse_config(&local_template()).unwrap();
        assert!(config.settings.is_none());
        assert!(config.search.is_none());
    }

    #[test]
    fn local_template_shows_the_defaults() {
        let raw = parse_config(LOCAL_TEMPLATE).unwrap();
        let settings = raw.settings.unwrap();
        let search = raw.search.unwrap();
        let datasets = raw.datasets.unwrap();

        let defaults = Settings::default();
        assert_eq!(settings.highlight, Some(defaults.highlight));
        assert_eq!(settings.theme, Some(defaults.theme));

        let defaults = SearchSettings::default();
        assert_eq!(search.stemmer.as_deref(), Some(defaults.stemmer.as_str()));
        assert_eq!(search.max_results, Some(defaults.max_results));
        assert_eq!(search.candidate_limit, Some(defaults.candidate_limit));
        assert_eq!(search.preview_chars, Some(defaults.preview_chars));
        assert_eq!(search.per_field_limit, Some(defaults.per_field_limit));
        let boosts = search.boosts.unwrap();
        assert_eq!(boosts.frame_name, Some(defaults.boosts.frame_name));
        assert_eq!(boosts.summary, Some(defaults.boosts.summary));

        let defaults = DatasetSettings::default();
        assert_eq!(datasets.primary, Some(defaults.primary));
        assert_eq!(datasets.secondary, Some(defaults.secondary));
        assert_eq!(datasets.ontology, Some(defaults.ontology));
    }
}
