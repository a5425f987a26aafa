//! The loaded ontology.

use std::collections::BTreeMap;

use crate::{FrameHierarchyWalker, FrameRecord, Hierarchy};

/// Frames and hierarchy for one ontology.
#[derive(Debug, Clone, Default)]
pub struct OntologyStore {
    /// Frame name -> record.
    frames: BTreeMap<String, FrameRecord>,
    /// Parent/child adjacency.
    hierarchy: Hierarchy,
}

impl OntologyStore {
    /// Creates a store from frames and an explicit hierarchy.
    pub fn new(frames: BTreeMap<String, FrameRecord>, hierarchy: Hierarchy) -> Self {
        Self { frames, hierarchy }
    }

    /// Creates a store whose hierarchy is derived from the frames' ancestor lists.
    pub fn from_frames(frames: BTreeMap<String, FrameRecord>) -> Self {
        let hierarchy = Hierarchy::from_frames(&frames);
        Self { frames, hierarchy }
    }

    /// Looks up a frame by name.
    pub fn frame(&self, name: &str) -> Option<&FrameRecord> {
        self.frames.get(name)
    }

    /// All declared roles of `frame` with their definitions.
    pub fn roles(&self, frame: &str) -> Option<&BTreeMap<String, String>> {
        self.frames.get(frame).map(|f| &f.all_roles)
    }

    /// Definition of `role` within `frame`, if declared.
    pub fn role_definition(&self, frame: &str, role: &str) -> Option<&str> {
        self.roles(frame)
            .and_then(|roles| roles.get(role))
            .map(String::as_str)
    }

    /// The frame hierarchy.
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// A traversal helper over the hierarchy.
    pub fn walker(&self) -> FrameHierarchyWalker<'_> {
        FrameHierarchyWalker::new(&self.hierarchy)
    }

    /// Frame names in sorted order.
    pub fn frame_names(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(String::as_str)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no frames are loaded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
