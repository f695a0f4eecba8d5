//! Note Graph Store
//!
//! The store is the exclusive owner of every [`Node`] and the sole mutator of
//! their relationships. All hierarchy edges (parent/children) and reference
//! edges (links/backlinks) are kept consistent here.
//!
//! # Atomicity
//!
//! Every operation validates its inputs completely before touching any node.
//! A failed operation returns an error and leaves the graph exactly as it
//! was, timestamps included.
//!
//! # Ordering
//!
//! The arena is insertion-ordered and children are kept in insertion order,
//! so enumeration and traversal are deterministic for an unmodified graph.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::error::{GraphError, Result};
use super::node::{Node, NodeId};
use super::traverse::{Subtree, Traversal};

/// An in-memory graph of notes with parent/child hierarchy and bidirectional
/// link tracking.
///
/// The graph is an explicitly constructed value; there is no implicit
/// instance. The editor layer holds one per session (see
/// [`SharedGraph`](crate::session::SharedGraph) when callers span threads).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteGraph {
    /// All nodes, indexed by id. Relations between nodes are stored as ids
    /// and resolved through this arena.
    nodes: IndexMap<NodeId, Node>,
}

impl NoteGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
        }
    }

    /// Create a node and wire it under `parent`, if one is named.
    ///
    /// Fails with [`GraphError::DuplicateId`] if the id is taken and
    /// [`GraphError::UnknownParent`] if the parent is absent. On success the
    /// new node is appended to the parent's children.
    pub fn create_node(
        &mut self,
        id: impl Into<NodeId>,
        directory: impl Into<PathBuf>,
        title: impl Into<String>,
        parent: Option<&str>,
    ) -> Result<&Node> {
        let id = id.into();
        if self.nodes.contains_key(id.as_str()) {
            return Err(GraphError::DuplicateId(id));
        }
        let parent_id = match parent {
            Some(p) => match self.nodes.get(p) {
                Some(node) => Some(node.id().clone()),
                None => return Err(GraphError::UnknownParent(NodeId::from(p))),
            },
            None => None,
        };

        let node = Node::new(id.clone(), directory, title, parent_id.clone());
        if let Some(pid) = &parent_id {
            if let Some(parent_node) = self.nodes.get_mut(pid.as_str()) {
                parent_node.push_child(id.clone());
            }
        }
        debug!(id = %id, parent = ?parent_id, "created node");
        self.nodes.insert(id.clone(), node);
        self.get_node(id.as_str())
    }

    /// Delete a node.
    ///
    /// A node with children is only deleted when `reparent_children_to`
    /// names an existing node outside the deleted subtree; its children are
    /// appended there in order. Every reference to the deleted id is removed
    /// from its peers' links, backlinks and children.
    ///
    /// Returns the removed node.
    pub fn delete_node(&mut self, id: &str, reparent_children_to: Option<&str>) -> Result<Node> {
        let node = self.get_node(id)?;
        let target_id = if node.children().is_empty() {
            None
        } else {
            let target = reparent_children_to
                .ok_or_else(|| GraphError::HasChildren(node.id().clone()))?;
            let target_node = self.get_node(target)?;
            if target == id || self.is_descendant(id, target) {
                return Err(GraphError::Cycle {
                    node: NodeId::from(id),
                    new_parent: target_node.id().clone(),
                });
            }
            Some(target_node.id().clone())
        };

        // All checks passed; from here on the operation cannot fail.
        let Some(node) = self.nodes.shift_remove(id) else {
            return Err(GraphError::UnknownId(NodeId::from(id)));
        };

        if let Some(pid) = node.parent() {
            if let Some(parent_node) = self.nodes.get_mut(pid.as_str()) {
                parent_node.remove_child(id);
            }
        }

        for child_id in node.children() {
            if let Some(child) = self.nodes.get_mut(child_id.as_str()) {
                child.set_parent(target_id.clone());
            }
            if let Some(tid) = &target_id {
                if let Some(target_node) = self.nodes.get_mut(tid.as_str()) {
                    target_node.push_child(child_id.clone());
                }
            }
        }

        for linked in node.links() {
            if let Some(peer) = self.nodes.get_mut(linked.as_str()) {
                peer.remove_backlink(id);
            }
        }
        for backlinked in node.backlinks() {
            if let Some(peer) = self.nodes.get_mut(backlinked.as_str()) {
                peer.remove_link(id);
            }
        }

        debug!(id, reparented_to = ?target_id, "deleted node");
        Ok(node)
    }

    /// Record that `from` references `to`.
    ///
    /// Both the forward link and the derived backlink are updated together.
    /// Adding a link that already exists is a no-op; the return value says
    /// whether the link was new.
    pub fn add_link(&mut self, from: &str, to: &str) -> Result<bool> {
        let from_id = self.get_node(from)?.id().clone();
        let to_id = self.get_node(to)?.id().clone();

        let inserted = self.get_node_mut(from)?.insert_link(to_id);
        if inserted {
            self.get_node_mut(to)?.insert_backlink(from_id);
            trace!(from, to, "linked");
        }
        Ok(inserted)
    }

    /// Remove the link from `from` to `to`, and its backlink.
    ///
    /// Removing a link that does not exist is a no-op; the return value says
    /// whether a link was removed.
    pub fn remove_link(&mut self, from: &str, to: &str) -> Result<bool> {
        self.get_node(from)?;
        self.get_node(to)?;

        let removed = self.get_node_mut(from)?.remove_link(to);
        if removed {
            self.get_node_mut(to)?.remove_backlink(from);
            trace!(from, to, "unlinked");
        }
        Ok(removed)
    }

    /// Move a node (and implicitly its subtree) under a new parent.
    ///
    /// Fails with [`GraphError::Cycle`] when the new parent is the node
    /// itself or one of its descendants. The node is appended to the new
    /// parent's children.
    pub fn move_node(&mut self, id: &str, new_parent: &str) -> Result<()> {
        let node_id = self.get_node(id)?.id().clone();
        let parent_id = self.get_node(new_parent)?.id().clone();
        if new_parent == id || self.is_descendant(id, new_parent) {
            return Err(GraphError::Cycle {
                node: node_id,
                new_parent: parent_id,
            });
        }

        let old_parent = self.get_node(id)?.parent().cloned();
        if let Some(pid) = &old_parent {
            if let Some(parent_node) = self.nodes.get_mut(pid.as_str()) {
                parent_node.remove_child(id);
            }
        }
        self.get_node_mut(new_parent)?.push_child(node_id);
        self.get_node_mut(id)?.set_parent(Some(parent_id));
        debug!(id, new_parent, "moved node");
        Ok(())
    }

    /// Detach a node from its parent, making it a root. No-op for roots.
    pub fn detach(&mut self, id: &str) -> Result<()> {
        let old_parent = self.get_node(id)?.parent().cloned();
        if let Some(pid) = old_parent {
            if let Some(parent_node) = self.nodes.get_mut(pid.as_str()) {
                parent_node.remove_child(id);
            }
            self.get_node_mut(id)?.set_parent(None);
            debug!(id, "detached node");
        }
        Ok(())
    }

    /// Change a node's display title.
    pub fn rename(&mut self, id: &str, title: impl Into<String>) -> Result<()> {
        self.get_node_mut(id)?.set_title(title);
        Ok(())
    }

    /// Repoint a node's content directory. The graph does not interpret the
    /// path; moving actual content is the editor layer's job.
    pub fn relocate(&mut self, id: &str, directory: impl Into<PathBuf>) -> Result<()> {
        self.get_node_mut(id)?.set_directory(directory);
        Ok(())
    }

    /// Add a tag to a node. Returns whether the tag was new.
    pub fn tag(&mut self, id: &str, tag: impl Into<String>) -> Result<bool> {
        let added = self.get_node_mut(id)?.insert_tag(tag.into());
        if added {
            trace!(id, "tagged");
        }
        Ok(added)
    }

    /// Remove a tag from a node. Returns whether the tag was present.
    pub fn untag(&mut self, id: &str, tag: &str) -> Result<bool> {
        Ok(self.get_node_mut(id)?.remove_tag(tag))
    }

    /// All nodes carrying the given tag, in arena order.
    pub fn nodes_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> {
        self.nodes.values().filter(move |node| node.has_tag(tag))
    }

    /// The first node carrying the given tag, if any. Well-known nodes such
    /// as the journal are found this way.
    pub fn first_tagged(&self, tag: &str) -> Option<&Node> {
        self.nodes.values().find(|node| node.has_tag(tag))
    }

    /// Get a node by id.
    pub fn get_node(&self, id: &str) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::UnknownId(NodeId::from(id)))
    }

    /// Enumerate the subtree rooted at `root`.
    ///
    /// The returned iterator is lazy and borrows the graph; every call
    /// produces a fresh sequence, and two calls over an unmodified graph
    /// yield identical sequences.
    pub fn traverse(&self, root: &str, order: Traversal) -> Result<Subtree<'_>> {
        let root = self.get_node(root)?;
        Ok(Subtree::new(self, root.id(), order))
    }

    /// The sibling following (or preceding) a node among its parent's
    /// children, wrapping around at the ends. Roots navigate among roots.
    /// A node with no siblings is its own neighbor.
    pub fn next_sibling(&self, id: &str, previous: bool) -> Result<&Node> {
        let node = self.get_node(id)?;
        let siblings: Vec<&NodeId> = match node.parent() {
            Some(pid) => self.get_node(pid.as_str())?.children().iter().collect(),
            None => self.roots().map(Node::id).collect(),
        };
        let len = siblings.len();
        let Some(pos) = siblings.iter().position(|s| s.as_str() == id) else {
            return Ok(node);
        };
        let step = if previous { len - 1 } else { 1 };
        self.get_node(siblings[(pos + step) % len].as_str())
    }

    /// All nodes, most recently updated first. Ties keep arena order.
    pub fn nodes_by_recency(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by(|a, b| b.updated().cmp(&a.updated()));
        nodes
    }

    /// All nodes, in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All roots (nodes without a parent), in arena order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|node| node.is_root())
    }

    /// Whether a node with the given id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// The total number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn lookup(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn get_node_mut(&mut self, id: &str) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::UnknownId(NodeId::from(id)))
    }

    /// Whether `node` lies strictly inside the subtree rooted at `ancestor`,
    /// following parent edges upward.
    fn is_descendant(&self, ancestor: &str, node: &str) -> bool {
        let mut current = self.nodes.get(node).and_then(Node::parent);
        while let Some(pid) = current {
            if pid.as_str() == ancestor {
                return true;
            }
            current = self.nodes.get(pid.as_str()).and_then(Node::parent);
        }
        false
    }
}

impl fmt::Display for NoteGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NoteGraph(")?;
        for id in self.nodes.keys() {
            writeln!(f, "\t{id}")?;
        }
        write!(f, ")")
    }
}
