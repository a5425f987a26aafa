//! Tantivy-backed fielded search for frex.
//!
//! This crate indexes the corpus search documents, one Tantivy document per example, and
//! answers searches field by field:
//! - [`Indexer`] builds the index under `.frex/index/` and tracks a config hash
//! - [`TantivyFieldIndex`] implements [`FieldSearchIndex`], exact and prefix queries on one field
//! - [`FieldedSearchEngine`] merges, ranks, caps and enriches field hits, falling back to a
//!   substring scan when no index is usable
//!
//! # Example
//!
//! ```no_run
//! use frex_config::Config;
//! use frex_data::{SearchDocument, SecondaryMapping};
//! use frex_index::{FieldGroups, FieldSearchIndex, FieldedSearchEngine, Indexer};
//!
//! let config = Config::load(".".as_ref()).unwrap();
//! let documents = vec![SearchDocument::default()];
//! let mapping = SecondaryMapping::default();
//!
//! let indexer = Indexer::new(&config, "data/famus/search_index.json".as_ref()).unwrap();
//! let index = indexer.open(&documents, &mapping).unwrap();
//! let engine = FieldedSearchEngine::new(&config.search);
//! let results = engine.search(
//!     "fire",
//!     FieldGroups::default(),
//!     Some(&index as &dyn FieldSearchIndex),
//!     &documents,
//!     &mapping,
//! );
//! println!("{} hits", results.hits.len());
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config_hash;
mod document;
mod engine;
mod error;
mod field_index;
mod fields;
mod indexer;
mod location;
mod schema;
mod status;
mod writer;

pub use analyzer::{build_analyzer_from_name, parse_language};
pub use config_hash::{IndexingConfig, SCHEMA_VERSION, compute_config_hash};
pub use document::IndexDocument;
pub use engine::{
    FieldedSearchEngine, SearchHit, SearchMode, SearchResults, SecondaryLink, rank_hits,
    truncate_preview,
};
pub use error::{IndexError, QueryError};
pub use field_index::{FieldHit, FieldSearchIndex, QueryPattern, TantivyFieldIndex};
pub use fields::{FieldGroup, FieldGroups, SearchField};
pub use indexer::{IndexStats, Indexer};
pub use location::{config_hash_path, index_directory};
pub use schema::IndexSchema;
pub use status::{
    IndexStatus, detect_index_status, index_exists, read_stored_hash, write_config_hash,
};
pub use writer::IndexWriter;
