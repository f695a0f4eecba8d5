//! Codex Core
//!
//! This crate provides the core note-graph engine for the Codex
//! note-taking environment. It implements:
//!
//! - An in-memory graph of notes with parent/child hierarchy
//! - Bidirectional link tracking (links and derived backlinks)
//! - Tagging and subtree traversal
//! - A lock-serialized session handle for multi-threaded hosts
//!
//! The crate is designed to be used both as a native Rust library and as a
//! Python extension module via PyO3 (behind the `python` feature); the
//! editor plugin that drives it lives outside this crate.
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - `graph`: the note graph itself: node arena, mutation operations,
//!   integrity enforcement and traversal
//! - `session`: the shared handle an editor session holds for its lifetime
//!
//! The graph is an explicitly constructed value with no global instance;
//! persistence and text parsing belong to the host.
//!
//! # Example
//!
//! ```rust,ignore
//! use codex_core::graph::{NoteGraph, Traversal};
//!
//! let mut graph = NoteGraph::new();
//! graph.create_node("1-journal", "notes/1-journal", "Journal", None)?;
//! graph.create_node("1-journal/1-today", "notes/1-journal/1-today", "Today", Some("1-journal"))?;
//! graph.create_node("2-desk", "notes/2-desk", "Desk", None)?;
//!
//! // Reference the desk from today's note; the backlink is derived.
//! graph.add_link("1-journal/1-today", "2-desk")?;
//! assert!(graph.get_node("2-desk")?.backlinks().contains("1-journal/1-today"));
//!
//! for node in graph.traverse("1-journal", Traversal::DepthFirst)? {
//!     println!("{}", node.title());
//! }
//! ```

pub mod graph;
pub mod session;

#[cfg(feature = "python")]
mod python;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition.
///
/// This function is called by Python when importing the module.
/// It registers all Python-exposed types and functions.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyNoteGraph>()?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
