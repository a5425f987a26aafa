//! Implementation of `frex frames`.

use std::{collections::BTreeSet, process::ExitCode};

use frex_data::FrameIndex;
use frex_ontology::FrameHierarchyWalker;

use crate::cli::{
    args::FramesCommand,
    context::CommandContext,
    output::{dim, subheader},
};

/// One printed row of the frame tree.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TreeRow<'a> {
    /// Nesting depth; roots are 0.
    depth: usize,
    /// Frame name.
    frame: &'a str,
    /// Examples evoking the frame.
    examples: usize,
    /// The frame was already expanded above; its subtree is not repeated.
    repeat: bool,
}

/// Prints the frame hierarchy, optionally filtered, with example counts.
pub fn run(ctx: &CommandContext, cmd: &FramesCommand) -> ExitCode {
    let corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };
    let filter = cmd.filter.as_deref().unwrap_or("").trim();

    let ontology = corpus.ontology();
    let rows = if ontology.hierarchy().is_empty() {
        flat_rows(corpus.frame_index(), filter)
    } else {
        tree_rows(ontology.walker(), corpus.frame_index(), filter)
    };

    if rows.is_empty() {
        println!("{}", dim("No frames match."));
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Frames ({}):", distinct(&rows))));
    for row in &rows {
        let indent = "  ".repeat(row.depth + 1);
        let count = if row.examples == 0 {
            String::new()
        } else {
            format!(" {}", dim(&format!("({})", row.examples)))
        };
        let marker = if row.repeat {
            format!(" {}", dim("(see above)"))
        } else {
            String::new()
        };
        println!("{indent}{}{count}{marker}", row.frame);
    }
    ExitCode::SUCCESS
}

/// Depth-first rows of the hierarchy under `filter`.
///
/// Children hang under their direct parents only. Each frame is expanded once; a frame
/// reached again through another parent or a cycle is printed marked and not expanded.
fn tree_rows<'a>(
    walker: FrameHierarchyWalker<'a>,
    frame_index: &FrameIndex,
    filter: &str,
) -> Vec<TreeRow<'a>> {
    let mut rows = Vec::new();
    let mut expanded = BTreeSet::new();
    for root in walker.visible_roots(filter) {
        push_subtree(walker, frame_index, filter, root, 0, &mut expanded, &mut rows);
    }
    rows
}

/// Appends `frame` and its visible descendants.
fn push_subtree<'a>(
    walker: FrameHierarchyWalker<'a>,
    frame_index: &FrameIndex,
    filter: &str,
    frame: &'a str,
    depth: usize,
    expanded: &mut BTreeSet<&'a str>,
    rows: &mut Vec<TreeRow<'a>>,
) {
    let repeat = !expanded.insert(frame);
    rows.push(TreeRow {
        depth,
        frame,
        examples: frame_index.instances(frame).len(),
        repeat,
    });
    if repeat {
        return;
    }
    let direct = walker.direct_children_of(frame);
    for child in walker.visible_children(frame, filter) {
        if direct.contains(&child) {
            push_subtree(walker, frame_index, filter, child, depth + 1, expanded, rows);
        }
    }
}

/// Frames from the example index alone, for corpora without a hierarchy.
fn flat_rows<'a>(frame_index: &'a FrameIndex, filter: &str) -> Vec<TreeRow<'a>> {
    let needle = filter.to_lowercase();
    frame_index
        .counts()
        .filter(|(frame, _)| frame.to_lowercase().contains(&needle))
        .map(|(frame, examples)| TreeRow {
            depth: 0,
            frame,
            examples,
            repeat: false,
        })
        .collect()
}

/// Number of distinct frames among `rows`.
fn distinct(rows: &[TreeRow<'_>]) -> usize {
    rows.iter().map(|row| row.frame).collect::<BTreeSet<_>>().len()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use frex_data::SearchDocument;
    use frex_ontology::{FrameRecord, OntologyStore};

    use super::*;

    fn frame(name: &str, ancestors: &[&str]) -> (String, FrameRecord) {
        (
            name.to_string(),
            FrameRecord {
                name: name.to_string(),
                ancestors: ancestors.iter().map(ToString::to_string).collect(),
                ..FrameRecord::default()
            },
        )
    }

    fn store() -> OntologyStore {
        let frames: BTreeMap<_, _> = [
            frame("Event", &[]),
            frame("Fire", &["Event"]),
            frame("Wildfire", &["Fire"]),
            frame("Meeting", &["Event"]),
        ]
        .into_iter()
        .collect();
        OntologyStore::from_frames(frames)
    }

    fn index() -> FrameIndex {
        let docs: Vec<_> = ["Fire", "Fire", "Meeting"]
            .iter()
            .enumerate()
            .map(|(id, frame)| SearchDocument {
                id,
                instance_id: format!("i{id}"),
                frame_name: (*frame).to_string(),
                ..SearchDocument::default()
            })
            .collect();
        FrameIndex::from_documents(&docs)
    }

    fn names<'a>(rows: &[TreeRow<'a>]) -> Vec<(usize, &'a str)> {
        rows.iter().map(|row| (row.depth, row.frame)).collect()
    }

    #[test]
    fn tree_is_depth_first_with_counts() {
        let store = store();
        let index = index();
        let rows = tree_rows(store.walker(), &index, "");
        assert_eq!(rows[0].frame, "Event");
        assert!(names(&rows).contains(&(2, "Wildfire")));
        let fire = rows.iter().find(|row| row.frame == "Fire").unwrap();
        assert_eq!((fire.depth, fire.examples), (1, 2));
    }

    #[test]
    fn filter_keeps_ancestors_of_matches() {
        let store = store();
        let index = index();
        let rows = tree_rows(store.walker(), &index, "wild");
        assert_eq!(
            names(&rows),
            vec![(0, "Event"), (1, "Fire"), (2, "Wildfire")]
        );
        assert_eq!(distinct(&rows), 3);
    }

    #[test]
    fn transitive_ancestor_lists_print_each_frame_once() {
        let chain: Vec<String> = (0..18).map(|i| format!("F{i:02}")).collect();
        let frames: BTreeMap<_, _> = chain
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let ancestors: Vec<&str> = chain[..i].iter().map(String::as_str).collect();
                frame(name, &ancestors)
            })
            .collect();
        let store = OntologyStore::from_frames(frames);
        let index = index();

        let rows = tree_rows(store.walker(), &index, "");
        assert_eq!(rows.len(), 18);
        assert_eq!(distinct(&rows), 18);
        assert!(rows.iter().all(|row| !row.repeat));
        for (depth, row) in rows.iter().enumerate() {
            assert_eq!((row.depth, row.frame), (depth, chain[depth].as_str()));
        }

        let rows = tree_rows(store.walker(), &index, "F17");
        assert_eq!(rows.len(), 18);
    }

    #[test]
    fn second_parent_shows_frame_without_repeating_subtree() {
        let frames: BTreeMap<_, _> = [
            frame("Event", &[]),
            frame("Process", &[]),
            frame("Fire", &["Event", "Process"]),
            frame("Wildfire", &["Fire", "Event", "Process"]),
        ]
        .into_iter()
        .collect();
        let store = OntologyStore::from_frames(frames);
        let index = index();

        let rows = tree_rows(store.walker(), &index, "");
        assert_eq!(
            names(&rows),
            vec![(0, "Event"), (1, "Fire"), (2, "Wildfire"), (0, "Process"), (1, "Fire")]
        );
        assert!(rows[4].repeat);
        assert_eq!(distinct(&rows), 4);
    }

    #[test]
    fn flat_rows_filter_by_name() {
        let index = index();
        let rows = flat_rows(&index, "MEET");
        assert_eq!(names(&rows), vec![(0, "Meeting")]);
        assert_eq!(rows[0].examples, 1);
    }
}
