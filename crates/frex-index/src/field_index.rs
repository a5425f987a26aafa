//! Per-field queries against the index.
//!
//! [`FieldSearchIndex`] is the seam the search engine talks to. [`TantivyFieldIndex`] is the
//! on-disk implementation.

use std::path::Path;

use tantivy::{
    Index, IndexReader, TantivyDocument,
    collector::TopDocs,
    directory::MmapDirectory,
    query::{BooleanQuery, Occur, Query, QueryParser, RegexQuery},
    schema::{Field, Value},
};
use tracing::debug;

use crate::{
    IndexError, QueryError, SearchField,
    analyzer::{FREX_TOKENIZER, build_analyzer_from_name, prefix_terms},
};

/// How a field query matches terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPattern {
    /// Analyzed terms must match indexed terms exactly.
    Exact(String),
    /// Each query term matches any indexed term it is a prefix of.
    Prefix(String),
}

impl QueryPattern {
    /// The raw query text.
    pub fn text(&self) -> &str {
        match self {
            Self::Exact(text) | Self::Prefix(text) => text,
        }
    }
}

/// One ranked match of a field query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldHit {
    /// Global example index of the matching document.
    pub doc_ref: usize,
    /// Unboosted relevance score.
    pub score: f32,
}

/// A full-text index queried one field at a time.
pub trait FieldSearchIndex {
    /// Ranked hits of `pattern` in `field`, best first.
    fn query(
        &self,
        field: SearchField,
        pattern: &QueryPattern,
    ) -> Result<Vec<FieldHit>, QueryError>;
}

/// A Tantivy index opened for reading.
pub struct TantivyFieldIndex {
    /// The Tantivy index.
    index: Index,
    /// Reader shared by all queries.
    reader: IndexReader,
    /// Document id field.
    id: Field,
    /// Maximum hits per query.
    limit: usize,
}

impl TantivyFieldIndex {
    /// Opens an existing index for searching.
    pub fn open(path: &Path, language: &str, limit: usize) -> Result<Self, IndexError> {
        if !path.exists() {
            return Err(IndexError::OpenIndex {
                path: path.to_path_buf(),
                message: "index directory does not exist".to_string(),
            });
        }

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;
        let index = Index::open(dir).map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        index
            .tokenizers()
            .register(FREX_TOKENIZER, build_analyzer_from_name(language)?);

        let id = index
            .schema()
            .get_field("id")
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        let reader = index.reader().map_err(|e| IndexError::read(&e))?;

        Ok(Self {
            index,
            reader,
            id,
            limit: limit.max(1),
        })
    }

    /// Raises the per-query hit cap to at least `limit`.
    pub fn with_min_limit(mut self, limit: usize) -> Self {
        self.limit = self.limit.max(limit);
        self
    }

    /// Returns the number of documents in the index.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Builds the Tantivy query for a pattern.
    fn build_query(
        &self,
        field: SearchField,
        handle: Field,
        pattern: &QueryPattern,
    ) -> Result<Box<dyn Query>, QueryError> {
        let malformed = |message: String| QueryError::Malformed {
            field: field.name().to_string(),
            message,
        };

        match pattern {
            QueryPattern::Exact(text) => QueryParser::for_index(&self.index, vec![handle])
                .parse_query(text)
                .map_err(|e| malformed(e.to_string())),
            QueryPattern::Prefix(text) => {
                let clauses = prefix_terms(text)
                    .into_iter()
                    .map(|term| {
                        RegexQuery::from_pattern(&format!("{term}.*"), handle)
                            .map(|query| (Occur::Should, Box::new(query) as Box<dyn Query>))
                            .map_err(|e| malformed(e.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if clauses.is_empty() {
                    return Err(malformed("no terms to expand".to_string()));
                }
                Ok(Box::new(BooleanQuery::new(clauses)))
            }
        }
    }
}

impl FieldSearchIndex for TantivyFieldIndex {
    fn query(
        &self,
        field: SearchField,
        pattern: &QueryPattern,
    ) -> Result<Vec<FieldHit>, QueryError> {
        let execution = |message: String| QueryError::Execution {
            field: field.name().to_string(),
            message,
        };

        let handle = self
            .index
            .schema()
            .get_field(field.name())
            .map_err(|_| QueryError::UnknownField(field.name().to_string()))?;
        let query = self.build_query(field, handle, pattern)?;

        let searcher = self.reader.searcher();
        let top_docs = searcher
            .search(&*query, &TopDocs::with_limit(self.limit))
            .map_err(|e| execution(e.to_string()))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| execution(e.to_string()))?;
            let Some(id) = doc.get_first(self.id).and_then(|v| v.as_u64()) else {
                continue;
            };
            hits.push(FieldHit {
                doc_ref: id as usize,
                score,
            });
        }

        debug!(field = %field, pattern = ?pattern, hits = hits.len(), "field query");
        Ok(hits)
    }
}

#[cfg(test)]
mod test {
    use frex_data::{SearchDocument, SecondaryMapping};
    use tempfile::TempDir;

    use super::*;
    use crate::{IndexDocument, IndexWriter};

    fn build(temp: &TempDir, docs: &[SearchDocument]) -> TantivyFieldIndex {
        let mapping = SecondaryMapping::default();
        let mut writer = IndexWriter::open(temp.path(), "english").unwrap();
        for doc in docs {
            writer.add_document(&IndexDocument::new(doc, &mapping)).unwrap();
        }
        writer.commit().unwrap();
        drop(writer);
        TantivyFieldIndex::open(temp.path(), "english", 100).unwrap()
    }

    fn frames() -> Vec<SearchDocument> {
        ["Fire", "Firefighter", "Flood"]
            .iter()
            .enumerate()
            .map(|(id, name)| SearchDocument {
                id: id + 10,
                frame_name: (*name).to_string(),
                report_text: format!("A report about {name}"),
                ..Default::default()
            })
            .collect()
    }

    fn refs(hits: &[FieldHit]) -> Vec<usize> {
        let mut refs: Vec<_> = hits.iter().map(|hit| hit.doc_ref).collect();
        refs.sort_unstable();
        refs
    }

    #[test]
    fn exact_matches_whole_terms_only() {
        let temp = TempDir::new().unwrap();
        let index = build(&temp, &frames());
        assert_eq!(index.num_docs(), 3);

        let hits = index
            .query(SearchField::FrameName, &QueryPattern::Exact("fire".into()))
            .unwrap();
        assert_eq!(refs(&hits), vec![10]);
        assert!(hits[0].score > 0.0);
    }

    #[test]
    fn prefix_expands_terms() {
        let temp = TempDir::new().unwrap();
        let index = build(&temp, &frames());

        let hits = index
            .query(SearchField::FrameName, &QueryPattern::Prefix("fire".into()))
            .unwrap();
        assert_eq!(refs(&hits), vec![10, 11]);
    }

    #[test]
    fn fields_are_independent() {
        let temp = TempDir::new().unwrap();
        let index = build(&temp, &frames());

        let hits = index
            .query(SearchField::ReportText, &QueryPattern::Exact("report".into()))
            .unwrap();
        assert_eq!(hits.len(), 3);
        let none = index
            .query(SearchField::FrameGloss, &QueryPattern::Exact("report".into()))
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn malformed_queries_are_errors() {
        let temp = TempDir::new().unwrap();
        let index = build(&temp, &frames());

        let err = index
            .query(SearchField::FrameName, &QueryPattern::Exact("nosuchfield:fire".into()))
            .unwrap_err();
        assert!(matches!(err, QueryError::Malformed { .. }));

        let err = index
            .query(SearchField::FrameName, &QueryPattern::Prefix("*".into()))
            .unwrap_err();
        assert!(matches!(err, QueryError::Malformed { .. }));
    }

    #[test]
    fn per_query_cap_can_be_raised() {
        let temp = TempDir::new().unwrap();
        let docs: Vec<SearchDocument> = (0..5)
            .map(|id| SearchDocument {
                id,
                frame_name: "Fire".to_string(),
                ..Default::default()
            })
            .collect();
        let mapping = SecondaryMapping::default();
        let mut writer = IndexWriter::open(temp.path(), "english").unwrap();
        for doc in &docs {
            writer.add_document(&IndexDocument::new(doc, &mapping)).unwrap();
        }
        writer.commit().unwrap();
        drop(writer);

        let fire = QueryPattern::Exact("fire".into());
        let capped = TantivyFieldIndex::open(temp.path(), "english", 2).unwrap();
        assert_eq!(capped.query(SearchField::FrameName, &fire).unwrap().len(), 2);

        let raised = capped.with_min_limit(4);
        assert_eq!(raised.query(SearchField::FrameName, &fire).unwrap().len(), 4);
        let unchanged = raised.with_min_limit(1);
        assert_eq!(unchanged.query(SearchField::FrameName, &fire).unwrap().len(), 4);
    }

    #[test]
    fn open_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let result = TantivyFieldIndex::open(&temp.path().join("absent"), "english", 10);
        assert!(matches!(result, Err(IndexError::OpenIndex { .. })));
    }
}
