//! Traversal over the frame hierarchy.
//!
//! Every traversal keeps a visited set, so malformed data with cycles terminates.

use std::collections::BTreeSet;

use crate::Hierarchy;

/// Read-only traversal helpers over a [`Hierarchy`].
#[derive(Debug, Clone, Copy)]
pub struct FrameHierarchyWalker<'a> {
    /// The hierarchy being walked.
    hierarchy: &'a Hierarchy,
}

impl<'a> FrameHierarchyWalker<'a> {
    /// Creates a walker over `hierarchy`.
    pub fn new(hierarchy: &'a Hierarchy) -> Self {
        Self { hierarchy }
    }

    /// Direct children of `frame`; empty if the frame is unknown.
    pub fn children_of(&self, frame: &str) -> &'a [String] {
        self.hierarchy
            .children
            .get(frame)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Direct parents of `frame`; empty if the frame is unknown.
    pub fn parents_of(&self, frame: &str) -> &'a [String] {
        self.hierarchy
            .parents
            .get(frame)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Adds every transitive ancestor of `frame` to `ancestors`.
    ///
    /// Frames already in the set are not expanded again.
    pub fn collect_ancestors(&self, frame: &str, ancestors: &mut BTreeSet<String>) {
        let mut stack: Vec<&str> = vec![frame];
        while let Some(current) = stack.pop() {
            for parent in self.parents_of(current) {
                if ancestors.insert(parent.clone()) {
                    stack.push(parent);
                }
            }
        }
    }

    /// Returns true if any transitive descendant of `frame` satisfies `predicate`.
    ///
    /// `frame` itself is not tested. Stops at the first match.
    pub fn has_descendant_matching<F>(&self, frame: &str, predicate: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        let mut visited: BTreeSet<&str> = BTreeSet::new();
        let mut stack: Vec<&str> = vec![frame];
        while let Some(current) = stack.pop() {
            for child in self.children_of(current) {
                if !visited.insert(child.as_str()) {
                    continue;
                }
                if predicate(child.as_str()) {
                    return true;
                }
                stack.push(child);
            }
        }
        false
    }

    /// Roots to show for a browse filter.
    ///
    /// An empty filter shows every root. Otherwise a root is visible when its name contains
    /// the filter (case-insensitive) or some descendant's name does.
    pub fn visible_roots(&self, filter: &str) -> Vec<&'a str> {
        self.hierarchy
            .roots
            .iter()
            .map(String::as_str)
            .filter(|root| self.is_visible(root, filter))
            .collect()
    }

    /// Children of `frame` that are visible under `filter`, by the same rule as roots.
    pub fn visible_children(&self, frame: &str, filter: &str) -> Vec<&'a str> {
        self.children_of(frame)
            .iter()
            .map(String::as_str)
            .filter(|child| self.is_visible(child, filter))
            .collect()
    }

    /// Children of `frame` not also reachable through one of its other children.
    ///
    /// Hierarchies derived from ancestor lists link a frame to every ancestor, not just its
    /// parent; this recovers the immediate edges.
    pub fn direct_children_of(&self, frame: &str) -> Vec<&'a str> {
        let children = self.children_of(frame);
        let ancestors: Vec<BTreeSet<String>> = children
            .iter()
            .map(|child| {
                let mut set = BTreeSet::new();
                self.collect_ancestors(child, &mut set);
                set
            })
            .collect();

        children
            .iter()
            .enumerate()
            .filter(|&(i, child)| {
                !children.iter().enumerate().any(|(j, other)| {
                    i != j
                        && ancestors[i].contains(other)
                        && !ancestors[j].contains(child)
                })
            })
            .map(|(_, child)| child.as_str())
            .collect()
    }

    /// Returns true if `frame` or one of its descendants matches `filter`.
    fn is_visible(&self, frame: &str, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        let needle = filter.to_lowercase();
        let matches = |name: &str| name.to_lowercase().contains(&needle);
        matches(frame) || self.has_descendant_matching(frame, matches)
    }

    /// All transitive ancestors of `frame`, sorted.
    pub fn ancestors_of(&self, frame: &str) -> Vec<String> {
        let mut ancestors = BTreeSet::new();
        self.collect_ancestors(frame, &mut ancestors);
        ancestors.into_iter().collect()
    }

    /// All transitive descendants of `frame`, sorted.
    pub fn descendants_of(&self, frame: &str) -> Vec<String> {
        let mut descendants: BTreeSet<String> = BTreeSet::new();
        let mut stack: Vec<&str> = vec![frame];
        while let Some(current) = stack.pop() {
            for child in self.children_of(current) {
                if descendants.insert(child.clone()) {
                    stack.push(child);
                }
            }
        }
        descendants.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn hierarchy(edges: &[(&str, &str)], roots: &[&str]) -> Hierarchy {
        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut parents: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (parent, child) in edges {
            children
                .entry(parent.to_string())
                .or_default()
                .push(child.to_string());
            parents
                .entry(child.to_string())
                .or_default()
                .push(parent.to_string());
        }
        Hierarchy {
            roots: roots.iter().map(|s| s.to_string()).collect(),
            children,
            parents,
        }
    }

    fn sample() -> Hierarchy {
        hierarchy(
            &[
                ("Event", "Fire"),
                ("Process", "Fire"),
                ("Fire", "Wildfire"),
                ("Event", "Meeting"),
            ],
            &["Event", "Process", "Entity"],
        )
    }

    #[test]
    fn unknown_frames_have_no_neighbors() {
        let h = sample();
        let walker = FrameHierarchyWalker::new(&h);
        assert!(walker.children_of("Nope").is_empty());
        assert!(walker.parents_of("Nope").is_empty());
        assert!(walker.ancestors_of("Nope").is_empty());
    }

    #[test]
    fn ancestors_follow_multiple_parents() {
        let h = sample();
        let walker = FrameHierarchyWalker::new(&h);
        assert_eq!(
            walker.ancestors_of("Wildfire"),
            vec!["Event", "Fire", "Process"]
        );
    }

    #[test]
    fn descendants_are_transitive() {
        let h = sample();
        let walker = FrameHierarchyWalker::new(&h);
        assert_eq!(
            walker.descendants_of("Event"),
            vec!["Fire", "Meeting", "Wildfire"]
        );
    }

    #[test]
    fn collect_ancestors_terminates_on_cycles() {
        let h = hierarchy(&[("A", "B"), ("B", "C"), ("C", "A")], &[]);
        let walker = FrameHierarchyWalker::new(&h);

        let mut set = BTreeSet::new();
        walker.collect_ancestors("A", &mut set);
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
        assert_eq!(walker.descendants_of("A"), vec!["A", "B", "C"]);
    }

    #[test]
    fn has_descendant_matching_is_cycle_safe() {
        let h = hierarchy(&[("A", "B"), ("B", "A")], &[]);
        let walker = FrameHierarchyWalker::new(&h);
        assert!(walker.has_descendant_matching("A", |name| name == "B"));
        assert!(!walker.has_descendant_matching("A", |name| name == "Z"));
    }

    #[test]
    fn has_descendant_matching_ignores_self() {
        let h = sample();
        let walker = FrameHierarchyWalker::new(&h);
        assert!(!walker.has_descendant_matching("Wildfire", |name| name == "Wildfire"));
        assert!(walker.has_descendant_matching("Process", |name| name == "Wildfire"));
    }

    #[test]
    fn visible_roots_match_name_or_descendant() {
        let h = sample();
        let walker = FrameHierarchyWalker::new(&h);
        assert_eq!(walker.visible_roots(""), vec!["Event", "Process", "Entity"]);
        assert_eq!(walker.visible_roots("wild"), vec!["Event", "Process"]);
        assert_eq!(walker.visible_roots("ENT"), vec!["Event", "Entity"]);
        assert!(walker.visible_roots("zzz").is_empty());
    }

    #[test]
    fn direct_children_drop_transitive_edges() {
        let h = hierarchy(
            &[
                ("Event", "Fire"),
                ("Event", "Wildfire"),
                ("Event", "Meeting"),
                ("Fire", "Wildfire"),
            ],
            &["Event"],
        );
        let walker = FrameHierarchyWalker::new(&h);
        assert_eq!(walker.direct_children_of("Event"), vec!["Fire", "Meeting"]);
        assert_eq!(walker.direct_children_of("Fire"), vec!["Wildfire"]);
        assert!(walker.direct_children_of("Wildfire").is_empty());
    }

    #[test]
    fn direct_children_keep_both_sides_of_a_cycle() {
        let h = hierarchy(&[("R", "A"), ("R", "B"), ("A", "B"), ("B", "A")], &["R"]);
        let walker = FrameHierarchyWalker::new(&h);
        assert_eq!(walker.direct_children_of("R"), vec!["A", "B"]);
    }

    #[test]
    fn visible_children_filter() {
        let h = sample();
        let walker = FrameHierarchyWalker::new(&h);
        assert_eq!(walker.visible_children("Event", "meet"), vec!["Meeting"]);
        assert_eq!(walker.visible_children("Event", ""), vec!["Fire", "Meeting"]);
    }
}
