use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashSet;

use crate::chunk_coord::ChunkCoord;

/// Receiver of "this chunk's mesh is stale" notifications.
///
/// Called synchronously from `World::set`, once per affected chunk, before
/// `set` returns.
pub trait ChunkListener {
    fn on_chunk_modified(&mut self, chunk: ChunkCoord);
}

impl<F> ChunkListener for F
where
    F: FnMut(ChunkCoord),
{
    #[inline]
    fn on_chunk_modified(&mut self, chunk: ChunkCoord) {
        self(chunk)
    }
}

/// Set of chunks awaiting a rebuild. Clones share the same set, so one handle
/// can be registered with the world while the renderer keeps another.
#[derive(Clone, Debug, Default)]
pub struct DirtySet {
    inner: Rc<RefCell<HashSet<ChunkCoord>>>,
}

impl DirtySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self, chunk: ChunkCoord) {
        self.inner.borrow_mut().insert(chunk);
    }

    pub fn contains(&self, chunk: ChunkCoord) -> bool {
        self.inner.borrow().contains(&chunk)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Takes every pending chunk, sorted so rebuilds run in a stable order.
    pub fn drain(&self) -> Vec<ChunkCoord> {
        let mut out: Vec<ChunkCoord> = self.inner.borrow_mut().drain().collect();
        out.sort_unstable();
        out
    }
}

impl ChunkListener for DirtySet {
    fn on_chunk_modified(&mut self, chunk: ChunkCoord) {
        self.mark(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_pending_chunks() {
        let renderer = DirtySet::new();
        let mut registered = renderer.clone();
        registered.on_chunk_modified(ChunkCoord::new(1, 0, 2));
        registered.on_chunk_modified(ChunkCoord::new(0, 0, 0));
        registered.on_chunk_modified(ChunkCoord::new(1, 0, 2));
        assert_eq!(renderer.len(), 2);
        assert!(renderer.contains(ChunkCoord::new(0, 0, 0)));

        let drained = renderer.drain();
        assert_eq!(drained, vec![ChunkCoord::new(0, 0, 0), ChunkCoord::new(1, 0, 2)]);
        assert!(registered.is_empty());
    }

    #[test]
    fn closures_are_listeners() {
        let mut seen = Vec::new();
        {
            let mut listener = |c: ChunkCoord| seen.push(c);
            listener.on_chunk_modified(ChunkCoord::new(4, 5, 6));
        }
        assert_eq!(seen, vec![ChunkCoord::new(4, 5, 6)]);
    }
}
