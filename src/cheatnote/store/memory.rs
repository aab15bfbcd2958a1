use super::{read_snapshot, write_snapshot, Loaded, NoteStore, StorageBackend};
use crate::error::Result;
use std::cell::{Cell, RefCell};

/// In-memory backend for testing.
///
/// Holds the encoded snapshot, so loads go through the same decoding path
/// as the file backend. Does NOT persist data.
#[derive(Default)]
pub struct MemoryBackend {
    snapshot: RefCell<Option<Vec<u8>>>,
    saves: Cell<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from raw bytes, e.g. a deliberately damaged database.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            snapshot: RefCell::new(Some(bytes)),
            saves: Cell::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.snapshot.borrow().clone()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Loaded> {
        match self.snapshot.borrow().as_deref() {
            Some(mut bytes) => read_snapshot(&mut bytes),
            None => Ok(Loaded::default()),
        }
    }

    fn save(&self, store: &NoteStore) -> Result<()> {
        let mut bytes = Vec::new();
        write_snapshot(&mut bytes, store)?;
        *self.snapshot.borrow_mut() = Some(bytes);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaved_backend_loads_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.load().unwrap().store.is_empty());
        assert!(backend.bytes().is_none());
    }

    #[test]
    fn save_then_load() {
        let backend = MemoryBackend::new();
        let mut store = NoteStore::new();
        store.add("title", "content", Some("tag")).unwrap();
        backend.save(&store).unwrap();

        let loaded = backend.load().unwrap();
        assert_eq!(loaded.store.notes(), store.notes());
        assert_eq!(backend.save_count(), 1);
    }
}
