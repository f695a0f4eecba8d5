//! Graph Errors
//!
//! Every graph operation returns [`Result`]. All error kinds are local,
//! recoverable conditions for the caller; none are fatal, and a failed
//! operation never leaves the graph partially mutated.

use thiserror::Error;

use super::node::NodeId;

/// Errors reported by note graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node with this id already exists.
    #[error("a node with id `{0}` already exists")]
    DuplicateId(NodeId),

    /// No node with this id exists.
    #[error("no node with id `{0}`")]
    UnknownId(NodeId),

    /// A parent was named at creation but does not exist.
    #[error("parent node `{0}` does not exist")]
    UnknownParent(NodeId),

    /// The node still has children and no re-parent target was given.
    #[error("node `{0}` still has children")]
    HasChildren(NodeId),

    /// The requested hierarchy change would make a node its own ancestor.
    #[error("moving `{node}` under `{new_parent}` would create a cycle")]
    Cycle {
        /// The node whose subtree is being re-homed.
        node: NodeId,
        /// The requested parent, which lies inside that subtree.
        new_parent: NodeId,
    },
}

/// Result type for note graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_offending_ids() {
        let err = GraphError::UnknownId(NodeId::from("2-desk/9-missing"));
        assert_eq!(err.to_string(), "no node with id `2-desk/9-missing`");

        let err = GraphError::Cycle {
            node: NodeId::from("1-a"),
            new_parent: NodeId::from("1-a/1-b"),
        };
        assert!(err.to_string().contains("1-a/1-b"));
    }
}
