//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, path::Path};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// The corpus root does not exist.
    DataDirMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The corpus root exists but is not a directory.
    DataDirNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// A dataset directory is missing from the corpus root.
    DatasetMissing {
        /// Configured dataset name.
        dataset: String,
        /// Expected directory.
        path: String,
    },
    /// A field boost is zero or negative, so the field can never rank.
    NonPositiveBoost {
        /// Field name.
        field: String,
        /// Configured boost.
        boost: f32,
    },
    /// The pre-enrichment cap is smaller than the final result cap.
    CandidateLimitBelowMaxResults {
        /// Configured candidate limit.
        candidate_limit: usize,
        /// Configured result cap.
        max_results: usize,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataDirMissing { path } => write!(f, "data directory does not exist: {path}"),
            Self::DataDirNotDirectory { path } => {
                write!(f, "data directory is not a directory: {path}")
            }
            Self::DatasetMissing { dataset, path } => {
                write!(f, "dataset '{dataset}' not found at {path}")
            }
            Self::NonPositiveBoost { field, boost } => {
                write!(f, "boost for field '{field}' is not positive: {boost}")
            }
            Self::CandidateLimitBelowMaxResults {
                candidate_limit,
                max_results,
            } => write!(
                f,
                "candidate_limit ({candidate_limit}) is smaller than max_results ({max_results})"
            ),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config, cwd: &Path) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    for (field, boost) in config.search.boosts.entries() {
        if boost <= 0.0 {
            warnings.push(ConfigWarning::NonPositiveBoost {
                field: field.to_string(),
                boost,
            });
        }
    }

    if config.search.candidate_limit < config.search.max_results {
        warnings.push(ConfigWarning::CandidateLimitBelowMaxResults {
            candidate_limit: config.search.candidate_limit,
            max_results: config.search.max_results,
        });
    }

    warnings.extend(validate_data_dir(config, cwd));
    warnings
}

/// Validates the corpus root and its dataset directories.
fn validate_data_dir(config: &Config, cwd: &Path) -> Vec<ConfigWarning> {
    let data_dir = config.data_dir(cwd);

    if !data_dir.exists() {
        return vec![ConfigWarning::DataDirMissing {
            path: data_dir.display().to_string(),
        }];
    }

    if !data_dir.is_dir() {
        return vec![ConfigWarning::DataDirNotDirectory {
            path: data_dir.display().to_string(),
        }];
    }

    [
        &config.datasets.primary,
        &config.datasets.secondary,
        &config.datasets.ontology,
    ]
    .into_iter()
    .filter_map(|dataset| {
        let path = data_dir.join(dataset);
        (!path.is_dir()).then(|| ConfigWarning::DatasetMissing {
            dataset: dataset.clone(),
            path: path.display().to_string(),
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_validate_missing_data_dir() {
        let test_dir = TestDir::new();
        let warnings = Config::default().validate(test_dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], ConfigWarning::DataDirMissing { .. }));
    }

    #[test]
    fn test_validate_missing_datasets() {
        let test_dir = TestDir::new();
        test_dir.create_dir("data/famus");

        let warnings = Config::default().validate(test_dir.path());
        let missing: Vec<&str> = warnings
            .iter()
            .filter_map(|w| match w {
                ConfigWarning::DatasetMissing { dataset, .. } => Some(dataset.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(missing, vec!["seamus", "ontology"]);
    }

    #[test]
    fn test_validate_complete_corpus() {
        let test_dir = TestDir::new();
        test_dir.create_dir("data/famus");
        test_dir.create_dir("data/seamus");
        test_dir.create_dir("data/ontology");

        assert!(Config::default().validate(test_dir.path()).is_empty());
    }

    #[test]
    fn test_validate_bad_search_settings() {
        let test_dir = TestDir::new();
        test_dir.create_dir("data/famus");
        test_dir.create_dir("data/seamus");
        test_dir.create_dir("data/ontology");

        let mut config = Config::default();
        config.search.boosts.roles = 0.0;
        config.search.candidate_limit = 10;

        let warnings = config.validate(test_dir.path());
        assert!(warnings.iter().any(
            |w| matches!(w, ConfigWarning::NonPositiveBoost { field, .. } if field == "roles")
        ));
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::CandidateLimitBelowMaxResults { .. }))
        );
    }
}
