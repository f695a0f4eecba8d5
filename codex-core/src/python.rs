//! Python Bindings
//!
//! The editor side of Codex is a Python plugin; this module exposes the
//! note graph to it. The Python type wraps a [`SharedGraph`] so the plugin
//! can hand the graph to background threads without extra locking on its
//! side.
//!
//! Compiled only with the `python` feature.

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::graph::{GraphError, Traversal};
use crate::session::SharedGraph;

impl From<GraphError> for PyErr {
    fn from(err: GraphError) -> PyErr {
        match err {
            GraphError::UnknownId(_) | GraphError::UnknownParent(_) => {
                PyKeyError::new_err(err.to_string())
            }
            GraphError::DuplicateId(_)
            | GraphError::HasChildren(_)
            | GraphError::Cycle { .. } => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Python-exposed note graph.
///
/// Mirrors the Rust API one-to-one, with ids as plain strings. Unknown ids
/// raise `KeyError`; structural violations raise `ValueError`.
#[pyclass(name = "NoteGraph")]
pub struct PyNoteGraph {
    graph: SharedGraph,
}

#[pymethods]
impl PyNoteGraph {
    /// Create an empty graph.
    #[new]
    fn new() -> Self {
        Self {
            graph: SharedGraph::new(),
        }
    }

    /// Create a node, optionally under a parent.
    #[pyo3(signature = (id, directory, title, parent=None))]
    fn create(&self, id: &str, directory: &str, title: &str, parent: Option<&str>) -> PyResult<()> {
        self.graph
            .update(|g| g.create_node(id, directory, title, parent).map(|_| ()))?;
        Ok(())
    }

    /// Delete a node, re-parenting its children when a target is given.
    #[pyo3(signature = (id, reparent_children_to=None))]
    fn delete(&self, id: &str, reparent_children_to: Option<&str>) -> PyResult<()> {
        self.graph
            .update(|g| g.delete_node(id, reparent_children_to).map(|_| ()))?;
        Ok(())
    }

    /// Record a reference from one node to another. Returns whether the
    /// link was new.
    fn link(&self, from_id: &str, to_id: &str) -> PyResult<bool> {
        Ok(self.graph.update(|g| g.add_link(from_id, to_id))?)
    }

    /// Remove a reference. Returns whether a link was removed.
    fn unlink(&self, from_id: &str, to_id: &str) -> PyResult<bool> {
        Ok(self.graph.update(|g| g.remove_link(from_id, to_id))?)
    }

    /// Move a node under a new parent.
    #[pyo3(name = "move")]
    fn move_node(&self, id: &str, new_parent: &str) -> PyResult<()> {
        Ok(self.graph.update(|g| g.move_node(id, new_parent))?)
    }

    /// Detach a node from its parent, making it a root.
    fn detach(&self, id: &str) -> PyResult<()> {
        Ok(self.graph.update(|g| g.detach(id))?)
    }

    /// Change a node's title.
    fn rename(&self, id: &str, title: &str) -> PyResult<()> {
        Ok(self.graph.update(|g| g.rename(id, title))?)
    }

    /// Repoint a node's content directory.
    fn relocate(&self, id: &str, directory: &str) -> PyResult<()> {
        Ok(self.graph.update(|g| g.relocate(id, directory))?)
    }

    /// Add a tag. Returns whether the tag was new.
    fn tag(&self, id: &str, tag: &str) -> PyResult<bool> {
        Ok(self.graph.update(|g| g.tag(id, tag))?)
    }

    /// Remove a tag. Returns whether the tag was present.
    fn untag(&self, id: &str, tag: &str) -> PyResult<bool> {
        Ok(self.graph.update(|g| g.untag(id, tag))?)
    }

    /// A node's title.
    fn title(&self, id: &str) -> PyResult<String> {
        Ok(self
            .graph
            .read(|g| g.get_node(id).map(|n| n.title().to_string()))?)
    }

    /// A node's content directory.
    fn directory(&self, id: &str) -> PyResult<String> {
        Ok(self
            .graph
            .read(|g| g.get_node(id).map(|n| n.directory().to_string_lossy().into_owned()))?)
    }

    /// A node's parent id, or None for roots.
    fn parent(&self, id: &str) -> PyResult<Option<String>> {
        Ok(self.graph.read(|g| {
            g.get_node(id)
                .map(|n| n.parent().map(|p| p.as_str().to_string()))
        })?)
    }

    /// A node's child ids, in order.
    fn children(&self, id: &str) -> PyResult<Vec<String>> {
        Ok(self.graph.read(|g| {
            g.get_node(id)
                .map(|n| n.children().iter().map(|c| c.as_str().to_string()).collect())
        })?)
    }

    /// Ids this node references.
    fn links(&self, id: &str) -> PyResult<Vec<String>> {
        Ok(self.graph.read(|g| {
            g.get_node(id)
                .map(|n| n.links().iter().map(|l| l.as_str().to_string()).collect())
        })?)
    }

    /// Ids referencing this node.
    fn backlinks(&self, id: &str) -> PyResult<Vec<String>> {
        Ok(self.graph.read(|g| {
            g.get_node(id)
                .map(|n| n.backlinks().iter().map(|b| b.as_str().to_string()).collect())
        })?)
    }

    /// A node's tags.
    fn tags(&self, id: &str) -> PyResult<Vec<String>> {
        Ok(self.graph.read(|g| {
            g.get_node(id)
                .map(|n| n.tags().iter().cloned().collect())
        })?)
    }

    /// Ids of the subtree below `root`, depth-first unless `breadth_first`.
    #[pyo3(signature = (root, breadth_first=false))]
    fn traverse(&self, root: &str, breadth_first: bool) -> PyResult<Vec<String>> {
        let order = if breadth_first {
            Traversal::BreadthFirst
        } else {
            Traversal::DepthFirst
        };
        Ok(self.graph.read(|g| {
            g.traverse(root, order)
                .map(|walk| walk.map(|n| n.id().as_str().to_string()).collect())
        })?)
    }

    fn __len__(&self) -> usize {
        self.graph.read(|g| g.len())
    }

    fn __contains__(&self, id: &str) -> bool {
        self.graph.read(|g| g.contains(id))
    }

    fn __repr__(&self) -> String {
        format!("NoteGraph(nodes={})", self.__len__())
    }
}
