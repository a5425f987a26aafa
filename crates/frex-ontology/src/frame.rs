//! Frame records from `frames.json`.

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{OntologyError, read_json};

/// A frame definition with its roles and position in the ontology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrameRecord {
    /// Frame name.
    pub name: String,
    /// Prose definition. Role names appear capitalized inside it.
    pub definition: String,
    /// Transitive ancestors as recorded by the ontology.
    pub ancestors: Vec<String>,
    /// Transitive descendants as recorded by the ontology.
    pub descendants: Vec<String>,
    /// Core roles: role name -> definition.
    pub core_roles: BTreeMap<String, String>,
    /// All roles, core and non-core: role name -> definition.
    pub all_roles: BTreeMap<String, String>,
}

impl FrameRecord {
    /// Returns true if `role` is one of this frame's core roles.
    pub fn is_core_role(&self, role: &str) -> bool {
        self.core_roles.contains_key(role)
    }
}

/// Loads `frames.json`, a map from frame name to [`FrameRecord`].
///
/// Records with an empty `name` take the name of their key.
pub fn load_frames(path: &Path) -> Result<BTreeMap<String, FrameRecord>, OntologyError> {
    let mut frames: BTreeMap<String, FrameRecord> = read_json(path)?;
    for (key, frame) in &mut frames {
        if frame.name.is_empty() {
            frame.name.clone_from(key);
        }
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn load_frames_fills_missing_names() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("frames.json");
        fs::write(
            &path,
            r#"{
                "Fire": {"definition": "A Fuel burns.", "all_roles": {"Fuel": "What burns"}},
                "Event": {"name": "Event", "definition": "Something happens."}
            }"#,
        )
        .unwrap();

        let frames = load_frames(&path).unwrap();
        assert_eq!(frames["Fire"].name, "Fire");
        assert_eq!(frames["Fire"].all_roles["Fuel"], "What burns");
        assert!(frames["Event"].ancestors.is_empty());
    }

    #[test]
    fn load_frames_reports_parse_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("frames.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = load_frames(&path).unwrap_err();
        assert!(matches!(err, OntologyError::ParseJson { .. }));
    }

    #[test]
    fn core_role_lookup() {
        let mut frame = FrameRecord::default();
        frame.core_roles.insert("Agent".into(), "Who acts".into());
        assert!(frame.is_core_role("Agent"));
        assert!(!frame.is_core_role("Place"));
    }
}
