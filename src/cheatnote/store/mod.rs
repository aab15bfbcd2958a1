//! # Storage Layer
//!
//! The [`NoteStore`] owns the notes in memory. A [`StorageBackend`] moves a
//! whole store to and from somewhere durable in one piece: there is no
//! per-record I/O and no index, every query scans the loaded records.
//!
//! ## Implementations
//!
//! - [`fs::FileBackend`]: a single binary database file, replaced atomically
//!   on every save (write `<path>.tmp`, then rename over `<path>`).
//! - [`memory::MemoryBackend`]: keeps the encoded snapshot in memory, for
//!   tests of the API layer.
//!
//! ## Loading Is Forgiving
//!
//! A missing file loads as an empty store. A damaged file (short header,
//! unknown signature, bad counts, truncated records) also loads as an empty
//! store, with a notice explaining why; nothing is salvaged from it. Only
//! genuine I/O failures are errors.
//!
//! ## Concurrency
//!
//! Each save is atomic, but a load, mutate, save cycle is not a transaction.
//! Two processes working on the same file race, and the last save wins.

use crate::codec::{
    decode_header, decode_record, encode_header, encode_record, Header, HEADER_SIZE, RECORD_SIZE,
};
use crate::error::Result;
use log::{info, warn};
use std::io::{self, Read, Write};

pub mod fs;
pub mod memory;
pub mod note_store;

pub use note_store::NoteStore;

/// A store fresh off a backend, plus anything odd noticed while reading it.
#[derive(Debug, Default)]
pub struct Loaded {
    pub store: NoteStore,
    pub notices: Vec<String>,
}

impl Loaded {
    fn fresh(notice: impl Into<String>) -> Self {
        Self {
            store: NoteStore::new(),
            notices: vec![notice.into()],
        }
    }
}

/// Abstract interface for whole-store persistence.
pub trait StorageBackend {
    /// Load the store. Missing or damaged data yields an empty store.
    fn load(&self) -> Result<Loaded>;

    /// Persist the store.
    /// MUST be atomic: a reader sees either the old or the new data in full.
    fn save(&self, store: &NoteStore) -> Result<()>;
}

/// Writes header and records to `out`.
pub(crate) fn write_snapshot<W: Write>(out: &mut W, store: &NoteStore) -> Result<()> {
    let header = Header {
        record_count: store.len() as u64,
        next_id: store.next_id(),
    };
    out.write_all(&encode_header(&header))?;
    for note in store {
        out.write_all(&encode_record(note))?;
    }
    Ok(())
}

/// Reads a snapshot, falling back to an empty store on any sign of damage.
pub(crate) fn read_snapshot<R: Read>(input: &mut R) -> Result<Loaded> {
    let mut header_bytes = [0u8; HEADER_SIZE];
    if let Err(e) = input.read_exact(&mut header_bytes) {
        return short_read(e, "Database header corrupted, starting fresh");
    }

    let header = match decode_header(&header_bytes) {
        Ok(header) => header,
        Err(fault) => {
            info!("event=db_load status=fallback reason=\"{}\"", fault);
            return Ok(Loaded::fresh(format!(
                "Database parameters invalid ({}), starting fresh",
                fault
            )));
        }
    };

    if header.record_count == 0 {
        return Ok(Loaded {
            store: NoteStore::with_next_id(header.next_id),
            notices: Vec::new(),
        });
    }

    let count = header.record_count as usize;
    let mut notes = Vec::new();
    notes
        .try_reserve_exact(count)
        .map_err(|e| crate::error::CheatnoteError::Allocation(e.to_string()))?;

    let mut suspicious = 0usize;
    let mut buf = vec![0u8; RECORD_SIZE];
    for _ in 0..count {
        if let Err(e) = input.read_exact(&mut buf) {
            return short_read(e, "Database records corrupted, starting fresh");
        }
        let decoded = decode_record(&buf);
        if decoded.suspicious {
            suspicious += 1;
        }
        notes.push(decoded.note);
    }

    let mut notices = Vec::new();
    if suspicious > 0 {
        warn!(
            "event=db_load status=integrity_warning suspicious_records={}",
            suspicious
        );
        notices.push(
            "Found possibly corrupted record(s) in DB; continuing with preserved data".to_string(),
        );
    }

    info!(
        "event=db_load status=ok records={} next_id={}",
        notes.len(),
        header.next_id
    );
    Ok(Loaded {
        store: NoteStore::from_records(notes, header.next_id)?,
        notices,
    })
}

fn short_read(err: io::Error, notice: &str) -> Result<Loaded> {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        info!("event=db_load status=fallback reason=short_read");
        Ok(Loaded::fresh(notice))
    } else {
        Err(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NoteUpdate;

    fn populated() -> NoteStore {
        let mut store = NoteStore::new();
        store.add("Git Status", "git status -s", Some("git,cli")).unwrap();
        store.add("List Files", "ls -la", None).unwrap();
        let id = store.add("Docker PS", "docker ps -a", Some("docker")).unwrap();
        store.edit(id, &NoteUpdate::new().tags("docker,ops")).unwrap();
        store
    }

    fn encode(store: &NoteStore) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_snapshot(&mut bytes, store).unwrap();
        bytes
    }

    #[test]
    fn snapshot_size_matches_layout() {
        let store = populated();
        assert_eq!(encode(&store).len(), HEADER_SIZE + 3 * RECORD_SIZE);
    }

    #[test]
    fn snapshot_restores_records_and_next_id() {
        let store = populated();
        let loaded = read_snapshot(&mut encode(&store).as_slice()).unwrap();
        assert!(loaded.notices.is_empty());
        assert_eq!(loaded.store.len(), store.len());
        assert_eq!(loaded.store.next_id(), store.next_id());
        assert_eq!(loaded.store.notes(), store.notes());
    }

    #[test]
    fn empty_store_keeps_next_id() {
        let mut store = NoteStore::new();
        let id = store.add("a", "b", None).unwrap();
        store.delete(id);
        let loaded = read_snapshot(&mut encode(&store).as_slice()).unwrap();
        assert!(loaded.store.is_empty());
        assert_eq!(loaded.store.next_id(), 2);
    }

    #[test]
    fn short_header_falls_back_to_empty() {
        let loaded = read_snapshot(&mut &b"CHN"[..]).unwrap();
        assert!(loaded.store.is_empty());
        assert_eq!(loaded.store.next_id(), 1);
        assert_eq!(loaded.notices.len(), 1);
    }

    #[test]
    fn garbage_header_falls_back_to_empty() {
        let garbage = vec![0xAB; HEADER_SIZE + RECORD_SIZE];
        let loaded = read_snapshot(&mut garbage.as_slice()).unwrap();
        assert!(loaded.store.is_empty());
        assert!(loaded.notices[0].contains("invalid"));
    }

    #[test]
    fn truncated_records_discard_everything() {
        let bytes = encode(&populated());
        let cut = &bytes[..bytes.len() - 10];
        let loaded = read_snapshot(&mut &cut[..]).unwrap();
        assert!(loaded.store.is_empty());
        assert_eq!(loaded.store.next_id(), 1);
        assert!(loaded.notices[0].contains("records corrupted"));
    }

    #[test]
    fn suspicious_records_are_kept_with_a_notice() {
        let mut bytes = encode(&populated());
        // zero the id of the first record
        bytes[HEADER_SIZE..HEADER_SIZE + 4].copy_from_slice(&0u32.to_le_bytes());
        let loaded = read_snapshot(&mut bytes.as_slice()).unwrap();
        assert_eq!(loaded.store.len(), 3);
        assert_eq!(loaded.notices.len(), 1);
    }
}
