//! Collapse state owned by the caller.
//!
//! The set holds container node ids (`vpc-…`, `subnet-…`). It is passed into
//! every layout call and never stored by the engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollapseSet(BTreeSet<String>);

impl CollapseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, node_id: &str) -> bool {
        self.0.contains(node_id)
    }

    /// Flip membership; returns whether the node is now collapsed.
    pub fn toggle(&mut self, node_id: &str) -> bool {
        if self.0.remove(node_id) {
            false
        } else {
            self.0.insert(node_id.to_string());
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CollapseSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Visibility of one container and of the nodes nested inside it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Visibility {
    /// The container itself is in the collapse set.
    pub collapsed: bool,
    /// The container is hidden by a collapsed ancestor.
    pub hidden: bool,
}

impl Visibility {
    pub(crate) fn of(set: &CollapseSet, node_id: &str, ancestor_hidden: bool) -> Self {
        Self { collapsed: set.is_collapsed(node_id), hidden: ancestor_hidden }
    }

    /// Whether nodes nested in this container are hidden.
    pub(crate) fn children_hidden(self) -> bool {
        self.hidden || self.collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut set = CollapseSet::new();
        assert!(set.toggle("vpc-a"));
        assert!(set.is_collapsed("vpc-a"));
        assert!(!set.toggle("vpc-a"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_deserialize_from_array() {
        let set: CollapseSet = serde_json::from_str(r#"["subnet-b", "vpc-a", "vpc-a"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["subnet-b", "vpc-a"]);
    }

    #[test]
    fn test_visibility_cascade() {
        let set: CollapseSet = ["vpc-a"].into_iter().collect();
        let vpc = Visibility::of(&set, "vpc-a", false);
        assert!(vpc.collapsed && !vpc.hidden && vpc.children_hidden());

        let subnet = Visibility::of(&set, "subnet-b", vpc.children_hidden());
        assert!(!subnet.collapsed && subnet.hidden && subnet.children_hidden());

        let open = Visibility::of(&set, "vpc-z", false);
        assert!(!open.children_hidden());
    }
}
