//! The frame hierarchy from `hierarchy.json`.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{FrameRecord, OntologyError, read_json};

/// Parent/child adjacency over frames. A DAG in well-formed data; cycles are tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Hierarchy {
    /// Frames with no parents, sorted.
    pub roots: Vec<String>,
    /// Parent -> sorted children.
    pub children: BTreeMap<String, Vec<String>>,
    /// Child -> sorted parents.
    pub parents: BTreeMap<String, Vec<String>>,
}

impl Hierarchy {
    /// Derives the hierarchy from each frame's `ancestors` list.
    ///
    /// Frames without ancestors become roots. Every listed ancestor becomes a parent.
    pub fn from_frames(frames: &BTreeMap<String, FrameRecord>) -> Self {
        let mut roots = BTreeSet::new();
        let mut children: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut parents: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for (name, frame) in frames {
            if frame.ancestors.is_empty() {
                roots.insert(name.clone());
            }
            for ancestor in &frame.ancestors {
                children
                    .entry(ancestor.clone())
                    .or_default()
                    .insert(name.clone());
                parents
                    .entry(name.clone())
                    .or_default()
                    .insert(ancestor.clone());
            }
        }

        Self {
            roots: roots.into_iter().collect(),
            children: into_sorted_lists(children),
            parents: into_sorted_lists(parents),
        }
    }

    /// Returns true if the hierarchy has no frames at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.children.is_empty() && self.parents.is_empty()
    }
}

/// Converts set-valued adjacency into sorted list-valued adjacency.
fn into_sorted_lists(map: BTreeMap<String, BTreeSet<String>>) -> BTreeMap<String, Vec<String>> {
    map.into_iter()
        .map(|(key, values)| (key, values.into_iter().collect()))
        .collect()
}

/// Loads `hierarchy.json`.
pub fn load_hierarchy(path: &Path) -> Result<Hierarchy, OntologyError> {
    read_json(path)
}
