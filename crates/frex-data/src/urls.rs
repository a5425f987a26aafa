//! Source links: the article and web page each example's source text came from.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{DataError, read_json};

/// Source links file at the corpus root.
pub const URLS_FILENAME: &str = "urls.json";

/// Where one example's source text came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceLinks {
    /// Article identifier: the first three dash-separated parts of the instance id.
    pub megawika_id: String,
    /// Wikipedia article title.
    pub article_title: String,
    /// Wikipedia article URL.
    pub wikipedia_url: String,
    /// Cited web page the source passage was taken from.
    pub source_url: String,
    /// Language code of the cited page.
    pub source_lang: String,
    /// Why a link is missing, when one is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SourceLinks {
    /// Returns true if neither URL is known.
    pub fn is_empty(&self) -> bool {
        self.wikipedia_url.is_empty() && self.source_url.is_empty()
    }
}

/// `urls.json`: instance id -> source links.
///
/// The file carries `stats` and `metadata` sections beside `urls`; only `urls` is read.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UrlMapping {
    /// Links by instance id.
    #[serde(default)]
    urls: HashMap<String, SourceLinks>,
}

impl UrlMapping {
    /// Loads the links file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        read_json(path)
    }

    /// Links for `instance_id`, if any.
    pub fn get(&self, instance_id: &str) -> Option<&SourceLinks> {
        self.urls.get(instance_id)
    }

    /// Number of linked instance ids.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if no instance has links.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn reads_urls_section_and_ignores_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(URLS_FILENAME);
        fs::write(
            &path,
            r#"{
                "urls": {
                    "1-2-3-0": {
                        "megawika_id": "1-2-3",
                        "article_title": "Great Fire",
                        "wikipedia_url": "https://en.wikipedia.org/wiki/Great_Fire",
                        "source_url": "https://example.org/fire",
                        "source_lang": "en"
                    },
                    "4-5-6-0": {"megawika_id": "4-5-6", "note": "Source URL not found"}
                },
                "stats": {"total_instances": 2, "source_urls_found": 1},
                "metadata": {"script": "extract"}
            }"#,
        )
        .unwrap();

        let mapping = UrlMapping::load(&path).unwrap();
        assert_eq!(mapping.len(), 2);

        let links = mapping.get("1-2-3-0").unwrap();
        assert_eq!(links.article_title, "Great Fire");
        assert_eq!(links.source_url, "https://example.org/fire");
        assert!(links.note.is_none());

        let missing = mapping.get("4-5-6-0").unwrap();
        assert!(missing.is_empty());
        assert_eq!(missing.note.as_deref(), Some("Source URL not found"));

        assert!(mapping.get("7-8-9-0").is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = UrlMapping::load(&dir.path().join(URLS_FILENAME)).unwrap_err();
        assert!(matches!(err, DataError::ReadFile { .. }));
    }
}
