//! Frame ontology for frex.
//!
//! Loads frame definitions and the frame hierarchy produced by the ontology preprocessing
//! step, and provides cycle-safe traversal over the hierarchy.

#![warn(missing_docs)]

mod error;
mod frame;
mod hierarchy;
mod store;
mod walker;

use std::{fs, path::Path};

pub use error::OntologyError;
pub use frame::{FrameRecord, load_frames};
pub use hierarchy::{Hierarchy, load_hierarchy};
use serde::de::DeserializeOwned;
pub use store::OntologyStore;
pub use walker::FrameHierarchyWalker;

/// Frame definitions file inside the ontology dataset.
pub const FRAMES_FILENAME: &str = "frames.json";

/// Hierarchy file inside the ontology dataset.
pub const HIERARCHY_FILENAME: &str = "hierarchy.json";

/// Reads and deserializes a JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, OntologyError> {
    let contents = fs::read_to_string(path).map_err(|source| OntologyError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| OntologyError::ParseJson {
        path: path.to_path_buf(),
        source,
    })
}
