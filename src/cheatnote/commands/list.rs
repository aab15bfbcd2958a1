use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::search::{NoteFilter, SearchOptions};
use crate::store::NoteStore;

/// Linear scan of the store, keeping notes that pass both filters.
pub fn run(store: &NoteStore, opts: &SearchOptions) -> Result<CmdResult> {
    let filter = NoteFilter::new(opts);
    let listed: Vec<_> = store.iter().filter(|n| filter.matches(n)).cloned().collect();

    let mut result = CmdResult::default();
    match listed.len() {
        0 => result.add_message(CmdMessage::info("No notes found matching the criteria")),
        n => result.add_message(CmdMessage::success(format!(
            "Found {} note{}",
            n,
            if n == 1 { "" } else { "s" }
        ))),
    }
    Ok(result.with_listed_notes(listed))
}
