use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{AddedVertex, Graph, Point};
use crate::error::Result;

/// A [`Graph`] behind one mutex, for hosts that mutate and render from different threads.
///
/// The matrix, the dirty flag and the cached coordinates share the lock, so a coordinate read
/// that follows a mutation always observes it.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<Mutex<Graph>>,
}

impl SharedGraph {
    pub fn new(graph: Graph) -> Self {
        Self {
            inner: Arc::new(Mutex::new(graph)),
        }
    }

    pub fn add_vertex(&self, connections: &[usize], self_loop: bool) -> AddedVertex {
        self.lock().add_vertex(connections, self_loop)
    }

    pub fn remove_vertex(&self, index: usize) -> Result<()> {
        self.lock().remove_vertex(index)
    }

    pub fn connections(&self, index: usize) -> Result<Vec<f64>> {
        self.lock().connections(index)
    }

    pub fn is_dirty(&self) -> bool {
        self.lock().is_dirty()
    }

    pub fn size(&self) -> usize {
        self.lock().size()
    }

    /// Copies the (possibly recomputed) coordinates out of the lock.
    pub fn coordinates(&self) -> Result<Vec<Point>> {
        let mut graph = self.lock();
        Ok(graph.coordinates()?.to_vec())
    }

    /// Runs `f` with exclusive access, for multi-step edits that must appear atomic.
    pub fn with<R>(&self, f: impl FnOnce(&mut Graph) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Graph> {
        // Poisoning is ignored: the matrix is replaced wholesale by each mutation.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
