use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CheatnoteError, Result};
use crate::store::NoteStore;

pub fn run(store: &mut NoteStore, title: &str, content: &str, tags: Option<&str>) -> Result<CmdResult> {
    let id = store.add(title, content, tags)?;
    let note = store
        .get(id)
        .cloned()
        .ok_or(CheatnoteError::NoteNotFound(id))?;

    let mut result = CmdResult::default().with_affected_notes(vec![note]);
    result.add_message(CmdMessage::success(format!(
        "Note added successfully with ID: {}",
        id
    )));
    Ok(result)
}
