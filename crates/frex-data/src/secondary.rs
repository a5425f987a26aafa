//! The secondary dataset: summaries cross-referenced to examples by instance id.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{DataError, TextOrList, read_json};

/// One link from an example to a summary record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SecondaryEntry {
    /// Summary record identifier.
    pub seamus_id: String,
    /// Global index of the summary record in the secondary chunks.
    pub idx: usize,
    /// Summary of the report.
    pub report_summary: TextOrList,
    /// Summary of report and source together.
    pub combined_summary: TextOrList,
}

/// Lookup of secondary records by document key.
pub trait EnrichmentSource {
    /// Entries linked to `document_key`; empty if none. The first entry is canonical.
    fn lookup(&self, document_key: &str) -> &[SecondaryEntry];
}

/// `instance_mapping.json`: instance id -> linked summary entries.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SecondaryMapping {
    /// Entries by instance id.
    entries: HashMap<String, Vec<SecondaryEntry>>,
}

impl SecondaryMapping {
    /// Loads the mapping file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        read_json(path)
    }

    /// Creates a mapping from explicit entries.
    pub fn from_entries(entries: HashMap<String, Vec<SecondaryEntry>>) -> Self {
        Self { entries }
    }

    /// The canonical entry for `instance_id`.
    pub fn first(&self, instance_id: &str) -> Option<&SecondaryEntry> {
        self.lookup(instance_id).first()
    }

    /// Number of linked instance ids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is linked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EnrichmentSource for SecondaryMapping {
    fn lookup(&self, document_key: &str) -> &[SecondaryEntry] {
        self.entries
            .get(document_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// One role filler inside a summary template.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TemplateSpan {
    /// Token range with its tokens.
    Object {
        /// First token.
        start_token: usize,
        /// Last token, inclusive.
        end_token: usize,
        /// Tokens covered.
        #[serde(default)]
        tokens: Vec<String>,
    },
    /// Bare inclusive `[start, end]` token range.
    Pair([usize; 2]),
    /// Data of an unrecognized shape.
    Malformed(serde_json::Value),
}

/// A role annotation over a token sequence. `end_token` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenAnnotation {
    /// Role name.
    pub role: String,
    /// First token.
    pub start_token: usize,
    /// Last token, inclusive.
    pub end_token: usize,
    /// Tokens covered, when recorded.
    pub tokens: Vec<String>,
}

/// Which summary of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    /// Summary of the report alone.
    Report,
    /// Summary of report and source.
    Combined,
}

impl SummaryKind {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Report => "Report summary",
            Self::Combined => "Combined summary",
        }
    }
}

/// A record from the secondary chunks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SummaryRecord {
    /// Record identifier.
    pub id: String,
    /// Linked example instance ids.
    pub instance_ids: Vec<String>,
    /// Summary of the report.
    pub report_summary: TextOrList,
    /// Role fillers of the report summary.
    pub report_summary_template: BTreeMap<String, Vec<TemplateSpan>>,
    /// Summary of report and source.
    pub combined_summary: TextOrList,
    /// Role fillers of the combined summary.
    pub combined_summary_template: BTreeMap<String, Vec<TemplateSpan>>,
    /// Roles of the summary template.
    pub template_roles: BTreeMap<String, serde_json::Value>,
    /// Dataset split.
    pub split: String,
    /// Frames of the linked examples.
    pub frames: Vec<String>,
    /// Frame name -> definition.
    pub frame_definitions: BTreeMap<String, String>,
    /// Role name -> definition.
    pub role_definitions: BTreeMap<String, String>,
}

impl SummaryRecord {
    /// Summary text of the given kind.
    pub fn summary(&self, kind: SummaryKind) -> &TextOrList {
        match kind {
            SummaryKind::Report => &self.report_summary,
            SummaryKind::Combined => &self.combined_summary,
        }
    }

    /// Tokens of the given summary.
    pub fn tokens(&self, kind: SummaryKind) -> Vec<String> {
        self.summary(kind).tokens()
    }

    /// Role fillers of the given summary as token annotations, in role order.
    ///
    /// Fillers with unrecognized shapes or reversed ranges are skipped.
    pub fn token_annotations(&self, kind: SummaryKind) -> Vec<TokenAnnotation> {
        let template = match kind {
            SummaryKind::Report => &self.report_summary_template,
            SummaryKind::Combined => &self.combined_summary_template,
        };

        let mut annotations = Vec::new();
        for (role, spans) in template {
            for span in spans {
                let (start_token, end_token, tokens) = match span {
                    TemplateSpan::Object {
                        start_token,
                        end_token,
                        tokens,
                    } => (*start_token, *end_token, tokens.clone()),
                    TemplateSpan::Pair([start, end]) => (*start, *end, Vec::new()),
                    TemplateSpan::Malformed(value) => {
                        warn!(record = %self.id, role = %role, %value, "skipping malformed template span");
                        continue;
                    }
                };
                if start_token > end_token {
                    warn!(record = %self.id, role = %role, start_token, end_token, "skipping reversed template span");
                    continue;
                }
                annotations.push(TokenAnnotation {
                    role: role.clone(),
                    start_token,
                    end_token,
                    tokens,
                });
            }
        }
        annotations
    }

    /// Every role mentioned by the record: template roles plus template fillers.
    pub fn roles(&self) -> BTreeSet<String> {
        self.template_roles
            .keys()
            .chain(self.report_summary_template.keys())
            .chain(self.combined_summary_template.keys())
            .cloned()
            .collect()
    }
}
