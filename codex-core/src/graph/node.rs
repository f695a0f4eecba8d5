//! Graph Nodes
//!
//! This module defines the node identity and entity types that live in the
//! note graph.

use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node in the note graph.
///
/// Ids are supplied by the caller when a node is created and stay stable for
/// the lifetime of the node. They are opaque to the graph; the editor layer
/// typically derives them from note paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// Lets the arena and edge sets be queried with plain `&str` keys.
impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single note in the graph.
///
/// A node records where its content lives (`directory`), how it sits in the
/// hierarchy (`parent`/`children`) and which other notes it references
/// (`links`, with the derived `backlinks` inverse). All relations are stored
/// as ids and resolved through the owning [`NoteGraph`]'s arena; a `Node`
/// never owns another `Node`.
///
/// Nodes are created and mutated exclusively by the [`NoteGraph`] so that the
/// hierarchy and link invariants hold after every operation.
///
/// [`NoteGraph`]: crate::graph::NoteGraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node.
    id: NodeId,

    /// Where the node's content lives. The graph treats this as an opaque
    /// path; resolving it to file content is the editor layer's job.
    directory: PathBuf,

    /// Display title. Not required to be unique.
    title: String,

    /// Parent node, if any. `None` for roots.
    parent: Option<NodeId>,

    /// Child nodes, in insertion order.
    children: Vec<NodeId>,

    /// Nodes this node references.
    links: IndexSet<NodeId>,

    /// Nodes that reference this node. Maintained by the graph as the
    /// inverse of `links`.
    backlinks: IndexSet<NodeId>,

    /// Free-form tags. Exact-match set semantics.
    tags: IndexSet<String>,

    /// When the node was created.
    created: DateTime<Utc>,

    /// When the node last changed. Advances on every successful mutation
    /// that touches this node.
    updated: DateTime<Utc>,
}

impl Node {
    /// Create a new node. Only the graph constructs nodes; hierarchy
    /// bookkeeping on the parent side happens there.
    pub(crate) fn new(
        id: NodeId,
        directory: impl Into<PathBuf>,
        title: impl Into<String>,
        parent: Option<NodeId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            directory: directory.into(),
            title: title.into(),
            parent,
            children: Vec::new(),
            links: IndexSet::new(),
            backlinks: IndexSet::new(),
            tags: IndexSet::new(),
            created: now,
            updated: now,
        }
    }

    /// Get the node's id.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Get the directory the node's content lives in.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Get the display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the parent id, if the node is not a root.
    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }

    /// Whether the node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Child ids, in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Ids of nodes this node references.
    pub fn links(&self) -> &IndexSet<NodeId> {
        &self.links
    }

    /// Ids of nodes referencing this node.
    pub fn backlinks(&self) -> &IndexSet<NodeId> {
        &self.backlinks
    }

    /// The node's tags.
    pub fn tags(&self) -> &IndexSet<String> {
        &self.tags
    }

    /// Whether the node carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// When the node was created.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// When the node last changed.
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    fn touch(&mut self) {
        self.updated = Utc::now();
    }

    pub(crate) fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub(crate) fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = directory.into();
        self.touch();
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
        self.touch();
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
        self.touch();
    }

    pub(crate) fn remove_child(&mut self, child: &str) {
        self.children.retain(|c| c.as_str() != child);
        self.touch();
    }

    /// Returns true if the link was not already present.
    pub(crate) fn insert_link(&mut self, to: NodeId) -> bool {
        let inserted = self.links.insert(to);
        if inserted {
            self.touch();
        }
        inserted
    }

    /// Returns true if the link was present.
    pub(crate) fn remove_link(&mut self, to: &str) -> bool {
        let removed = self.links.shift_remove(to);
        if removed {
            self.touch();
        }
        removed
    }

    /// Returns true if the backlink was not already present.
    pub(crate) fn insert_backlink(&mut self, from: NodeId) -> bool {
        let inserted = self.backlinks.insert(from);
        if inserted {
            self.touch();
        }
        inserted
    }

    /// Returns true if the backlink was present.
    pub(crate) fn remove_backlink(&mut self, from: &str) -> bool {
        let removed = self.backlinks.shift_remove(from);
        if removed {
            self.touch();
        }
        removed
    }

    /// Returns true if the tag was not already present.
    pub(crate) fn insert_tag(&mut self, tag: String) -> bool {
        let inserted = self.tags.insert(tag);
        if inserted {
            self.touch();
        }
        inserted
    }

    /// Returns true if the tag was present.
    pub(crate) fn remove_tag(&mut self, tag: &str) -> bool {
        let removed = self.tags.shift_remove(tag);
        if removed {
            self.touch();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> Node {
        Node::new(NodeId::from(id), "notes/test", "Test", None)
    }

    #[test]
    fn new_node_is_an_empty_root() {
        let n = node("1-test");
        assert_eq!(n.id().as_str(), "1-test");
        assert!(n.is_root());
        assert!(n.children().is_empty());
        assert!(n.links().is_empty());
        assert!(n.backlinks().is_empty());
        assert!(n.tags().is_empty());
        assert_eq!(n.created(), n.updated());
    }

    #[test]
    fn tag_insertion_is_a_set_operation() {
        let mut n = node("1-test");
        assert!(n.insert_tag("journal".to_string()));
        assert!(!n.insert_tag("journal".to_string()));
        assert!(n.has_tag("journal"));
        // Case-sensitive exact match.
        assert!(!n.has_tag("Journal"));
        assert_eq!(n.tags().len(), 1);

        assert!(n.remove_tag("journal"));
        assert!(!n.remove_tag("journal"));
        assert!(n.tags().is_empty());
    }

    #[test]
    fn link_sets_dedupe() {
        let mut n = node("1-test");
        assert!(n.insert_link(NodeId::from("2-other")));
        assert!(!n.insert_link(NodeId::from("2-other")));
        assert_eq!(n.links().len(), 1);
        assert!(n.links().contains("2-other"));

        assert!(n.remove_link("2-other"));
        assert!(!n.remove_link("2-other"));
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut n = node("1-test");
        n.push_child(NodeId::from("1-test/1-a"));
        n.push_child(NodeId::from("1-test/2-b"));
        n.push_child(NodeId::from("1-test/3-c"));
        let ids: Vec<&str> = n.children().iter().map(NodeId::as_str).collect();
        assert_eq!(ids, ["1-test/1-a", "1-test/2-b", "1-test/3-c"]);

        n.remove_child("1-test/2-b");
        let ids: Vec<&str> = n.children().iter().map(NodeId::as_str).collect();
        assert_eq!(ids, ["1-test/1-a", "1-test/3-c"]);
    }

    #[test]
    fn mutation_advances_updated() {
        let mut n = node("1-test");
        let before = n.updated();
        n.set_title("Renamed");
        assert!(n.updated() >= before);
        assert_eq!(n.title(), "Renamed");
    }
}
