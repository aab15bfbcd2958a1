use crate::codec::{HEADER_SIZE, RECORD_SIZE};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::NoteStore;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_notes: usize,
    pub total_chars: usize,
    pub total_lines: usize,
    pub avg_chars: f64,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
    /// Size of the database file for this many records.
    pub db_size_bytes: usize,
}

pub fn run(store: &NoteStore) -> Result<CmdResult> {
    let stats = collect(store);
    let mut result = CmdResult::default();
    if stats.total_notes == 0 {
        result.add_message(CmdMessage::info("No notes in database"));
    }
    Ok(result.with_stats(stats))
}

fn collect(store: &NoteStore) -> Stats {
    let total_notes = store.len();
    let mut total_chars = 0;
    let mut total_lines = 0;
    for note in store {
        total_chars += note.content.chars().count();
        if !note.content.is_empty() {
            total_lines += note.content.matches('\n').count() + 1;
        }
    }

    let avg_chars = if total_notes > 0 {
        total_chars as f64 / total_notes as f64
    } else {
        0.0
    };

    Stats {
        total_notes,
        total_chars,
        total_lines,
        avg_chars,
        oldest: store.iter().map(|n| n.created_at).min(),
        newest: store.iter().map(|n| n.created_at).max(),
        db_size_bytes: HEADER_SIZE + RECORD_SIZE * total_notes,
    }
}
