//! Note Graph
//!
//! This module implements the in-memory note graph: an arena of nodes with
//! parent/child hierarchy and bidirectional link tracking.
//!
//! # Overview
//!
//! The graph holds two kinds of relations:
//!
//! - Hierarchy: every node has at most one parent and an ordered list of
//!   children. The hierarchy is a forest, never cyclic.
//! - References: a node links to other nodes; the graph derives and
//!   maintains the inverse backlinks automatically.
//!
//! # Design Decisions
//!
//! 1. Nodes live in a central arena keyed by id rather than owning each
//!    other: both relation kinds are naturally cyclic as object graphs, so
//!    edges are stored as plain id references and resolved through the
//!    arena lookup table.
//!
//! 2. [`NoteGraph`] is the only mutator. Creation, linking, moving and
//!    deletion all go through it, so the hierarchy and link-symmetry
//!    invariants hold after every call.
//!
//! 3. The arena and the per-node edge sets are insertion-ordered, which
//!    keeps enumeration and traversal deterministic.

mod error;
mod node;
mod store;
mod traverse;

pub use error::{GraphError, Result};
pub use node::{Node, NodeId};
pub use store::NoteGraph;
pub use traverse::{Subtree, Traversal};
