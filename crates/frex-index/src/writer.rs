//! Index writer for adding example documents to the Tantivy index.

use std::{fs, path::Path};

use tantivy::{Index, IndexWriter as TantivyIndexWriter, TantivyDocument, directory::MmapDirectory};

use crate::{
    SearchField,
    analyzer::{FREX_TOKENIZER, build_analyzer_from_name},
    document::IndexDocument,
    error::IndexError,
    schema::IndexSchema,
};

/// Default heap size for the index writer (50 MB).
const DEFAULT_HEAP_SIZE: usize = 50_000_000;

/// Writes example documents to a Tantivy index.
pub struct IndexWriter {
    /// The Tantivy index.
    index: Index,
    /// The underlying Tantivy writer.
    writer: TantivyIndexWriter,
    /// Schema with field handles.
    schema: IndexSchema,
}

impl IndexWriter {
    /// Opens or creates an index at `path`, analyzing text with the `language` stemmer.
    pub fn open(path: &Path, language: &str) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();
        let analyzer = build_analyzer_from_name(language)?;

        fs::create_dir_all(path)?;

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;

        let index = Index::open_or_create(dir, schema.schema().clone())
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        index.tokenizers().register(FREX_TOKENIZER, analyzer);

        let writer = index
            .writer(DEFAULT_HEAP_SIZE)
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        Ok(Self {
            index,
            writer,
            schema,
        })
    }

    /// Stages one example. Nothing is visible until [`commit`](Self::commit).
    pub fn add_document(&mut self, doc: &IndexDocument<'_>) -> Result<(), IndexError> {
        let mut tantivy_doc = TantivyDocument::new();

        tantivy_doc.add_u64(self.schema.id, doc.source.id as u64);
        tantivy_doc.add_text(self.schema.instance_id, &doc.source.instance_id);
        for field in SearchField::ALL {
            tantivy_doc.add_text(self.schema.field(field), doc.text(field));
        }

        self.writer
            .add_document(tantivy_doc)
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Commits all pending changes to the index.
    pub fn commit(&mut self) -> Result<(), IndexError> {
        self.writer.commit().map_err(|e| IndexError::commit(&e))?;
        Ok(())
    }

    /// Deletes all documents from the index.
    pub fn delete_all(&mut self) -> Result<(), IndexError> {
        self.writer
            .delete_all_documents()
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Returns the number of committed documents.
    pub fn num_docs(&self) -> Result<u64, IndexError> {
        let reader = self.index.reader().map_err(|e| IndexError::read(&e))?;
        Ok(reader.searcher().num_docs())
    }
}

#[cfg(test)]
mod test {
    use frex_data::{SearchDocument, SecondaryMapping};
    use tempfile::TempDir;

    use super::*;

    fn search_doc(id: usize, frame: &str) -> SearchDocument {
        SearchDocument {
            id,
            instance_id: format!("inst-{id}"),
            frame_name: frame.to_string(),
            report_text: "Crews fought the blaze.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn creates_index_in_empty_directory() {
        let temp = TempDir::new().unwrap();
        let writer = IndexWriter::open(temp.path(), "english").unwrap();
        assert!(temp.path().join("meta.json").exists());
        drop(writer);
    }

    #[test]
    fn rejects_unknown_stemmer() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            IndexWriter::open(temp.path(), "klingon"),
            Err(IndexError::InvalidLanguage(_))
        ));
    }

    #[test]
    fn adds_commits_and_clears() {
        let temp = TempDir::new().unwrap();
        let mut writer = IndexWriter::open(temp.path(), "english").unwrap();
        let mapping = SecondaryMapping::default();

        for doc in [search_doc(0, "Fire"), search_doc(1, "Firefighting")] {
            writer.add_document(&IndexDocument::new(&doc, &mapping)).unwrap();
        }
        writer.commit().unwrap();
        assert_eq!(writer.num_docs().unwrap(), 2);

        writer.delete_all().unwrap();
        writer.commit().unwrap();
        assert_eq!(writer.num_docs().unwrap(), 0);
    }

    #[test]
    fn reopens_existing_index() {
        let temp = TempDir::new().unwrap();
        let mapping = SecondaryMapping::default();
        {
            let mut writer = IndexWriter::open(temp.path(), "english").unwrap();
            let doc = search_doc(0, "Fire");
            writer.add_document(&IndexDocument::new(&doc, &mapping)).unwrap();
            writer.commit().unwrap();
        }
        let writer = IndexWriter::open(temp.path(), "english").unwrap();
        assert_eq!(writer.num_docs().unwrap(), 1);
    }
}
