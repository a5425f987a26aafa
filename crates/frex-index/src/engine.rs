//! Fielded search over the corpus.
//!
//! Each active field is queried on its own: an exact query first, then a prefix query only
//! when the exact one finds nothing. Hits from all fields are concatenated, deduplicated by
//! document keeping the first occurrence, ranked by boosted score, enriched with secondary
//! summaries and capped. Without a usable index the same pipeline runs over a linear
//! substring scan.

use std::collections::{HashMap, HashSet};

use frex_config::{FieldBoosts, SearchSettings};
use frex_data::{EnrichmentSource, SearchDocument};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    FieldGroups, FieldHit, FieldSearchIndex, IndexDocument, QueryError, QueryPattern,
    SearchField,
};

/// Marker appended to truncated previews.
const ELLIPSIS: &str = "...";

/// The secondary record linked to a hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecondaryLink {
    /// Summary record identifier.
    pub seamus_id: String,
    /// Global index of the summary record.
    pub idx: usize,
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Global example index.
    pub document_ref: usize,
    /// Boosted score of the kept occurrence.
    pub score: f32,
    /// The matching search document.
    pub document: SearchDocument,
    /// Canonical secondary record, if the example has one.
    pub secondary: Option<SecondaryLink>,
    /// Short text to show with the hit.
    pub preview: String,
}

/// How a search was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Through the full-text index.
    Index,
    /// Through the substring scan.
    Fallback,
}

/// Hits of one search and how they were found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    /// Ranked hits, best first.
    pub hits: Vec<SearchHit>,
    /// Whether the index or the fallback answered.
    pub mode: SearchMode,
}

/// Runs fielded searches with configured boosts and caps.
#[derive(Debug, Clone)]
pub struct FieldedSearchEngine {
    /// Per-field boosts.
    boosts: FieldBoosts,
    /// Cap applied before enrichment.
    candidate_limit: usize,
    /// Final cap.
    max_results: usize,
    /// Preview length in characters.
    preview_chars: usize,
}

impl Default for FieldedSearchEngine {
    fn default() -> Self {
        Self::new(&SearchSettings::default())
    }
}

impl FieldedSearchEngine {
    /// Creates an engine from search settings.
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            boosts: settings.boosts,
            candidate_limit: settings.candidate_limit,
            max_results: settings.max_results,
            preview_chars: settings.preview_chars,
        }
    }

    /// Overrides the final result cap, raising the candidate cap to match when it is lower.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self.candidate_limit = self.candidate_limit.max(max_results);
        self
    }

    /// Searches `documents` for `query` in the fields enabled by `groups`.
    ///
    /// `index` is `None` when the engine is unavailable; the search then runs as a substring
    /// scan. It also falls back when every field query it attempted failed.
    pub fn search(
        &self,
        query: &str,
        groups: FieldGroups,
        index: Option<&dyn FieldSearchIndex>,
        documents: &[SearchDocument],
        enrichment: &dyn EnrichmentSource,
    ) -> SearchResults {
        let query = query.trim();
        if query.is_empty() {
            return SearchResults {
                hits: Vec::new(),
                mode: if index.is_some() {
                    SearchMode::Index
                } else {
                    SearchMode::Fallback
                },
            };
        }

        let fields = groups.active_fields();
        let indexed = match index {
            Some(index) => self.query_fields(index, query, &fields),
            None => {
                warn!("search index unavailable; scanning documents");
                None
            }
        };

        match indexed {
            Some(raw) => SearchResults {
                hits: self.finish(raw, documents, enrichment),
                mode: SearchMode::Index,
            },
            None => self.fallback(query, groups, documents, enrichment),
        }
    }

    /// Linear substring scan with the same gating, enrichment and caps as an indexed search.
    ///
    /// A document scores the sum of the boosts of every active field containing the query,
    /// case-insensitively.
    pub fn fallback(
        &self,
        query: &str,
        groups: FieldGroups,
        documents: &[SearchDocument],
        enrichment: &dyn EnrichmentSource,
    ) -> SearchResults {
        let needle = query.trim().to_lowercase();
        let fields = groups.active_fields();

        let mut raw = Vec::new();
        if !needle.is_empty() {
            for doc in documents {
                let indexed = IndexDocument::new(doc, enrichment);
                let mut matched = false;
                let mut score = 0.0;
                for field in &fields {
                    if indexed.text(*field).to_lowercase().contains(&needle) {
                        matched = true;
                        score += field.boost(&self.boosts);
                    }
                }
                if matched {
                    raw.push(FieldHit {
                        doc_ref: doc.id,
                        score,
                    });
                }
            }
        }

        SearchResults {
            hits: self.finish(raw, documents, enrichment),
            mode: SearchMode::Fallback,
        }
    }

    /// Queries every field in order. Returns `None` if every attempted query failed.
    fn query_fields(
        &self,
        index: &dyn FieldSearchIndex,
        query: &str,
        fields: &[SearchField],
    ) -> Option<Vec<FieldHit>> {
        let mut attempted = 0;
        let mut failed = 0;
        let mut raw = Vec::new();

        for &field in fields {
            let boost = field.boost(&self.boosts);
            let mut run = |pattern: QueryPattern| -> Result<Vec<FieldHit>, QueryError> {
                attempted += 1;
                index.query(field, &pattern).inspect_err(|err| {
                    failed += 1;
                    warn!(field = %field, error = %err, "field query failed");
                })
            };

            let hits = match run(QueryPattern::Exact(query.to_string())) {
                Ok(hits) if hits.is_empty() => {
                    run(QueryPattern::Prefix(query.to_string())).unwrap_or_default()
                }
                Ok(hits) => hits,
                Err(_) => continue,
            };

            raw.extend(hits.into_iter().map(|hit| FieldHit {
                doc_ref: hit.doc_ref,
                score: hit.score * boost,
            }));
        }

        debug!(attempted, failed, raw = raw.len(), "fielded search");
        if attempted > 0 && failed == attempted {
            warn!("every field query failed; scanning documents");
            return None;
        }
        Some(raw)
    }

    /// Deduplicates, ranks, caps and enriches raw hits.
    fn finish(
        &self,
        raw: Vec<FieldHit>,
        documents: &[SearchDocument],
        enrichment: &dyn EnrichmentSource,
    ) -> Vec<SearchHit> {
        let by_id: HashMap<usize, &SearchDocument> =
            documents.iter().map(|doc| (doc.id, doc)).collect();

        let mut hits: Vec<SearchHit> = rank_hits(raw, self.candidate_limit)
            .into_iter()
            .filter_map(|hit| {
                let Some(document) = by_id.get(&hit.doc_ref) else {
                    debug!(doc_ref = hit.doc_ref, "hit without a search document");
                    return None;
                };
                Some(self.enrich(hit, document, enrichment))
            })
            .collect();
        hits.truncate(self.max_results);
        hits
    }

    /// Attaches the secondary link and preview to a hit.
    fn enrich(
        &self,
        hit: FieldHit,
        document: &SearchDocument,
        enrichment: &dyn EnrichmentSource,
    ) -> SearchHit {
        let entry = enrichment.lookup(&document.instance_id).first();

        let preview_source = entry
            .and_then(|entry| {
                [&entry.combined_summary, &entry.report_summary]
                    .into_iter()
                    .find(|text| !text.is_empty())
                    .map(|text| text.joined())
            })
            .or_else(|| {
                [&document.report_text, &document.source_text]
                    .into_iter()
                    .find(|text| !text.trim().is_empty())
                    .cloned()
            })
            .unwrap_or_default();

        SearchHit {
            document_ref: hit.doc_ref,
            score: hit.score,
            document: document.clone(),
            secondary: entry.map(|entry| SecondaryLink {
                seamus_id: entry.seamus_id.clone(),
                idx: entry.idx,
            }),
            preview: truncate_preview(&preview_source, self.preview_chars),
        }
    }
}

/// Deduplicates by document keeping the first occurrence, sorts by descending score (stable),
/// and truncates to `limit`.
pub fn rank_hits(raw: Vec<FieldHit>, limit: usize) -> Vec<FieldHit> {
    let mut seen = HashSet::new();
    let mut hits: Vec<FieldHit> = raw
        .into_iter()
        .filter(|hit| seen.insert(hit.doc_ref))
        .collect();
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits.truncate(limit);
    hits
}

/// Cuts `text` to `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}{ELLIPSIS}", cut.trim_end())
}
