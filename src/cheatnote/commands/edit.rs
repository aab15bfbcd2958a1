use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CheatnoteError, Result};
use crate::model::NoteUpdate;
use crate::store::NoteStore;

pub fn run(store: &mut NoteStore, id: u32, update: &NoteUpdate) -> Result<CmdResult> {
    if update.is_empty() {
        return Err(CheatnoteError::InvalidInput(
            "At least one field (title, content, or tags) must be provided for edit".to_string(),
        ));
    }

    if !store.edit(id, update)? {
        return Err(CheatnoteError::NoteNotFound(id));
    }

    let note = store
        .get(id)
        .cloned()
        .ok_or(CheatnoteError::NoteNotFound(id))?;
    let mut result = CmdResult::default().with_affected_notes(vec![note]);
    result.add_message(CmdMessage::success("Note updated successfully"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_existing_note() {
        let mut store = NoteStore::new();
        let id = store.add("Old", "body", None).unwrap();
        let result = run(&mut store, id, &NoteUpdate::new().title("New")).unwrap();
        assert_eq!(result.affected_notes[0].title, "New");
        assert_eq!(store.get(id).unwrap().content, "body");
    }

    #[test]
    fn empty_title_only_refreshes_modified_time() {
        let mut store = NoteStore::new();
        let id = store.add("Keep", "body", Some("t")).unwrap();
        let before = store.get(id).unwrap().clone();

        let result = run(&mut store, id, &NoteUpdate::new().title("")).unwrap();
        let after = &result.affected_notes[0];
        assert_eq!(after.title, "Keep");
        assert_eq!(after.content, before.content);
        assert_eq!(after.tags, before.tags);
        assert!(after.modified_at >= before.modified_at);
    }

    #[test]
    fn requires_some_field() {
        let mut store = NoteStore::new();
        let id = store.add("Old", "body", None).unwrap();
        let err = run(&mut store, id, &NoteUpdate::new()).unwrap_err();
        assert!(matches!(err, CheatnoteError::InvalidInput(_)));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut store = NoteStore::new();
        let err = run(&mut store, 7, &NoteUpdate::new().title("x")).unwrap_err();
        assert!(matches!(err, CheatnoteError::NoteNotFound(7)));
    }
}
