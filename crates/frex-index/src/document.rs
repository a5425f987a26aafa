//! The per-example text that goes into the index.

use frex_data::{EnrichmentSource, SearchDocument, SecondaryEntry};

use crate::SearchField;

/// Searchable text of one example, with its secondary summary resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDocument<'a> {
    /// The corpus search document.
    pub source: &'a SearchDocument,
    /// Joined report and combined summaries of the canonical secondary entry.
    pub summary: String,
}

impl<'a> IndexDocument<'a> {
    /// Resolves the summary text of `source` through `enrichment`.
    pub fn new(source: &'a SearchDocument, enrichment: &dyn EnrichmentSource) -> Self {
        let summary = enrichment
            .lookup(&source.instance_id)
            .first()
            .map(summary_text)
            .unwrap_or_default();
        Self { source, summary }
    }

    /// Text of `field`.
    pub fn text(&self, field: SearchField) -> String {
        let doc = self.source;
        match field {
            SearchField::FrameName => doc.frame_name.clone(),
            SearchField::FrameGloss => doc.frame_gloss.clone(),
            SearchField::FrameDefinition => doc.frame_definition.clone(),
            SearchField::ReportText => doc.report_text.clone(),
            SearchField::SourceText => doc.source_text.clone(),
            SearchField::Roles => doc.roles.join(" "),
            SearchField::Summary => self.summary.clone(),
        }
    }
}

/// Both summaries of an entry as one string.
fn summary_text(entry: &SecondaryEntry) -> String {
    [entry.report_summary.joined(), entry.combined_summary.joined()]
        .into_iter()
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
