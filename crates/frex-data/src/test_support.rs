//! A small on-disk corpus for tests.

use std::{fs, path::Path};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Three examples in two primary chunks, one linked summary, a three-frame ontology, and
/// source links for the first example.
pub struct FixtureCorpus {
    /// Owned corpus root.
    root: TempDir,
}

impl FixtureCorpus {
    /// Writes the fixture to a fresh temporary directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let fixture = Self { root };
        fixture.write_primary();
        fixture.write_secondary();
        fixture.write_ontology();
        fixture.write_urls();
        fixture
    }

    /// Corpus root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Writes a JSON value to a path relative to the root.
    fn write(&self, rel_path: &str, value: &Value) {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    /// Writes the primary dataset.
    fn write_primary(&self) {
        let examples = [
            ("inst-0", "Fire", "The cat sat near the fire."),
            ("inst-1", "Fire", "Smoke rose over the hills."),
            ("inst-2", "Firefighting", "Crews fought the blaze."),
        ];

        let records: Vec<Value> = examples
            .iter()
            .map(|(id, frame, text)| {
                json!({
                    "instance_id": id,
                    "frame": frame,
                    "frame_gloss": "burning",
                    "report": {
                        "text": text,
                        "annotations": [{"role": "Place", "span": [0, 2], "role_definition": "Where"}],
                        "trigger": {"start_char": 4, "end_char": 6, "frame": frame}
                    },
                    "source": {"text": text, "annotations": []},
                    "split": "train"
                })
            })
            .collect();

        self.write(
            "famus/metadata.json",
            &json!({"total_instances": 3, "chunk_size": 2, "num_chunks": 2,
                    "frames": ["Fire", "Firefighting"], "splits": {"train": 3}}),
        );
        self.write("famus/chunk_0000.json", &json!(records[..2]));
        self.write("famus/chunk_0001.json", &json!(records[2..]));

        let documents: Vec<Value> = examples
            .iter()
            .enumerate()
            .map(|(i, (id, frame, text))| {
                json!({"id": i, "instance_id": id, "frame_name": frame, "report_text": text,
                       "source_text": text, "roles": ["Place"]})
            })
            .collect();
        self.write("famus/search_index.json", &json!(documents));
    }

    /// Writes the secondary dataset.
    fn write_secondary(&self) {
        self.write(
            "seamus/instance_mapping.json",
            &json!({"inst-0": [{"seamus_id": "sum-0", "idx": 0,
                                "report_summary": "A cat sat by a fire"}]}),
        );
        self.write(
            "seamus/chunk_0000.json",
            &json!([{"id": "sum-0", "instance_ids": ["inst-0"],
                     "report_summary": "A cat sat by a fire",
                     "report_summary_template": {"Place": [[4, 5]]}}]),
        );
    }

    /// Writes the ontology.
    fn write_ontology(&self) {
        self.write(
            "ontology/frames.json",
            &json!({
                "Event": {"name": "Event", "definition": "Something happens."},
                "Fire": {"name": "Fire", "definition": "A Fuel burns in a Place.",
                         "ancestors": ["Event"], "all_roles": {"Fuel": "What burns", "Place": "Where"}},
                "Firefighting": {"name": "Firefighting", "definition": "An Agent fights a Fire.",
                                 "ancestors": ["Event"], "all_roles": {"Agent": "Who fights"}}
            }),
        );
        self.write(
            "ontology/hierarchy.json",
            &json!({"roots": ["Event"], "children": {"Event": ["Fire", "Firefighting"]},
                    "parents": {"Fire": ["Event"], "Firefighting": ["Event"]}}),
        );
    }

    /// Writes the source links file.
    fn write_urls(&self) {
        self.write(
            "urls.json",
            &json!({"urls": {"inst-0": {"megawika_id": "inst-0",
                                        "article_title": "Great Fire",
                                        "wikipedia_url": "https://en.wikipedia.org/wiki/Great_Fire",
                                        "source_url": "https://example.org/fire",
                                        "source_lang": "en"}},
                    "stats": {"total_instances": 1}}),
        );
    }
}
