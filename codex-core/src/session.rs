//! Editor Session Handle
//!
//! The graph itself is a plain single-threaded value. An editor session,
//! however, may call in from more than one thread (the UI thread and a
//! background indexer, say), so this module wraps the graph in a cheaply
//! clonable handle that serializes every operation behind one exclusive
//! lock.
//!
//! # Thread Safety
//!
//! One coarse mutex guards the whole graph. A personal note graph is small
//! and operations are bounded, so finer-grained locking buys nothing here;
//! serializing whole operations also keeps them atomic with respect to each
//! other.
//!
//! The handle is the value the integration layer creates when an editor
//! session starts and drops (or unwraps) when it ends; there is no implicit
//! global instance.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::graph::NoteGraph;

/// A shared, lock-serialized handle to a [`NoteGraph`].
///
/// Clones share the same underlying graph: cloning is an `Arc` bump, not a
/// copy of the nodes.
#[derive(Debug, Default)]
pub struct SharedGraph {
    inner: Arc<Mutex<NoteGraph>>,
}

impl SharedGraph {
    /// Create a handle around a new empty graph.
    pub fn new() -> Self {
        Self::from_graph(NoteGraph::new())
    }

    /// Wrap an existing graph, e.g. one rebuilt by the host from storage.
    pub fn from_graph(graph: NoteGraph) -> Self {
        Self {
            inner: Arc::new(Mutex::new(graph)),
        }
    }

    /// Run a read-only closure against the graph.
    pub fn read<R>(&self, f: impl FnOnce(&NoteGraph) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Run a mutating closure against the graph. The whole closure runs
    /// under the lock, so multi-step edits are atomic towards other callers.
    pub fn update<R>(&self, f: impl FnOnce(&mut NoteGraph) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Tear down the handle and reclaim the graph, e.g. for persistence at
    /// session end. Returns `None` while other clones are still alive.
    pub fn into_inner(self) -> Option<NoteGraph> {
        Arc::try_unwrap(self.inner).ok().map(Mutex::into_inner)
    }
}

impl Clone for SharedGraph {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let session = SharedGraph::new();
        let other = session.clone();

        session.update(|g| g.create_node("1-inbox", "notes/1-inbox", "Inbox", None).map(|_| ()))
            .unwrap();

        assert!(other.read(|g| g.contains("1-inbox")));
        assert_eq!(other.read(|g| g.len()), 1);
    }

    #[test]
    fn into_inner_reclaims_the_graph() {
        let session = SharedGraph::new();
        session
            .update(|g| g.create_node("1-inbox", "notes/1-inbox", "Inbox", None).map(|_| ()))
            .unwrap();

        let clone = session.clone();
        // Still shared; teardown refuses.
        assert!(clone.into_inner().is_none());

        let graph = session.into_inner().expect("last handle");
        assert!(graph.contains("1-inbox"));
    }

    #[test]
    fn concurrent_mutation_is_serialized() {
        let session = SharedGraph::new();
        session
            .update(|g| -> crate::graph::Result<()> {
                g.create_node("left", "notes/left", "Left", None)?;
                g.create_node("right", "notes/right", "Right", None)?;
                Ok(())
            })
            .unwrap();

        let handles: Vec<_> = ["left", "right"]
            .into_iter()
            .map(|root| {
                let session = session.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let id = format!("{root}/{i}");
                        session
                            .update(|g| g.create_node(id.as_str(), "x", "n", Some(root)).map(|_| ()))
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(session.read(|g| g.len()), 202);
        assert_eq!(
            session.read(|g| g.get_node("left").unwrap().children().len()),
            100
        );
        assert_eq!(
            session.read(|g| g.get_node("right").unwrap().children().len()),
            100
        );
    }
}
