//! Records of the primary dataset: examples, their documents and annotations, and the
//! flattened search documents.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::{Deserialize, Serialize};

/// Character extent of an annotation: one inclusive `[start, end]` pair, or several for a
/// discontiguous annotation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AnnotationSpan {
    /// A single contiguous span.
    Single([usize; 2]),
    /// A discontiguous span.
    Multi(Vec<[usize; 2]>),
    /// Span data of an unrecognized shape.
    Malformed(serde_json::Value),
}

impl AnnotationSpan {
    /// The inclusive `(start, end)` ranges, or `None` for malformed data.
    pub fn ranges(&self) -> Option<Vec<(usize, usize)>> {
        match self {
            Self::Single([start, end]) => Some(vec![(*start, *end)]),
            Self::Multi(parts) if !parts.is_empty() => {
                Some(parts.iter().map(|[start, end]| (*start, *end)).collect())
            }
            Self::Multi(_) | Self::Malformed(_) => None,
        }
    }
}

/// A labeled span of text filling a role of the example's frame.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Annotation {
    /// The annotated text, as recorded by the annotators.
    pub text: Option<String>,
    /// Character extent.
    pub span: Option<AnnotationSpan>,
    /// Token extent.
    pub token_span: Option<AnnotationSpan>,
    /// Role name.
    pub role: String,
    /// Annotator label; usually equal to the role.
    pub label: Option<String>,
    /// Definition of the role in the example's frame.
    pub role_definition: Option<String>,
}

/// The word that evokes the frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Trigger {
    /// Trigger text.
    #[serde(default)]
    pub text: Option<String>,
    /// First character.
    pub start_char: usize,
    /// Last character, inclusive.
    pub end_char: usize,
    /// First token.
    #[serde(default)]
    pub start_token: Option<usize>,
    /// Last token, inclusive.
    #[serde(default)]
    pub end_token: Option<usize>,
    /// Frame evoked.
    #[serde(default)]
    pub frame: String,
}

/// One version of an example's text with its annotations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Document {
    /// Full text.
    pub text: String,
    /// Role annotations over `text`.
    pub annotations: Vec<Annotation>,
    /// Frame trigger, if annotated.
    pub trigger: Option<Trigger>,
}

/// Which document of an example to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentVersion {
    /// The short report describing the event.
    #[default]
    Report,
    /// The longer source article.
    Source,
}

impl DocumentVersion {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Source => "source",
        }
    }
}

impl fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An annotated example from the primary dataset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Example {
    /// Stable instance identifier, used to link secondary summaries.
    pub instance_id: String,
    /// Frame name.
    pub frame: String,
    /// Short gloss of the frame.
    pub frame_gloss: String,
    /// Frame definition from the ontology.
    pub frame_definition: String,
    /// Frame ancestors from the ontology.
    pub frame_ancestors: Vec<String>,
    /// Frame descendants from the ontology.
    pub frame_descendants: Vec<String>,
    /// Report document.
    pub report: Document,
    /// Source document.
    pub source: Document,
    /// Dataset split.
    pub split: String,
}

impl Example {
    /// Returns the requested document.
    pub fn document(&self, version: DocumentVersion) -> &Document {
        match version {
            DocumentVersion::Report => &self.report,
            DocumentVersion::Source => &self.source,
        }
    }

    /// Roles annotated in either document, sorted.
    pub fn annotated_roles(&self) -> BTreeSet<String> {
        self.report
            .annotations
            .iter()
            .chain(&self.source.annotations)
            .filter(|a| !a.role.is_empty())
            .map(|a| a.role.clone())
            .collect()
    }

    /// Role definitions carried by the annotations of both documents.
    pub fn role_definitions(&self) -> BTreeMap<String, String> {
        let mut definitions = BTreeMap::new();
        for annotation in self.report.annotations.iter().chain(&self.source.annotations) {
            if let Some(definition) = &annotation.role_definition {
                definitions
                    .entry(annotation.role.clone())
                    .or_insert_with(|| definition.clone());
            }
        }
        definitions
    }
}

/// The flattened, searchable projection of an example.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchDocument {
    /// Global example index.
    pub id: usize,
    /// Instance identifier of the example.
    #[serde(default)]
    pub instance_id: String,
    /// Frame name.
    #[serde(default)]
    pub frame_name: String,
    /// Frame gloss.
    #[serde(default)]
    pub frame_gloss: String,
    /// Frame definition.
    #[serde(default)]
    pub frame_definition: String,
    /// Frame ancestors.
    #[serde(default)]
    pub frame_ancestors: Vec<String>,
    /// Leading report text.
    #[serde(default)]
    pub report_text: String,
    /// Leading source text.
    #[serde(default)]
    pub source_text: String,
    /// Roles annotated in the example.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// `metadata.json` of a chunked dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Metadata {
    /// Number of records.
    pub total_instances: usize,
    /// Records per chunk file.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Number of chunk files.
    #[serde(default)]
    pub num_chunks: usize,
    /// Distinct frames in the dataset.
    #[serde(default)]
    pub frames: Vec<String>,
    /// Record count per split.
    #[serde(default)]
    pub splits: BTreeMap<String, usize>,
}

/// Chunk size used by the preprocessing scripts.
pub(crate) fn default_chunk_size() -> usize {
    1000
}
