use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CheatnoteError, Result};
use crate::store::NoteStore;

pub fn run(store: &mut NoteStore, id: u32) -> Result<CmdResult> {
    let note = store
        .get(id)
        .cloned()
        .ok_or(CheatnoteError::NoteNotFound(id))?;
    if !store.delete(id) {
        return Err(CheatnoteError::NoteNotFound(id));
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Note deleted successfully: {}",
        note.title
    )));
    Ok(result.with_affected_notes(vec![note]))
}
