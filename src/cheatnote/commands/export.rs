use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CheatnoteError, Result};
use crate::model::Note;
use crate::store::NoteStore;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const CSV_HEADER: &str = "ID,Title,Content,Tags,Created,Modified";

pub fn run(store: &NoteStore, path: &Path) -> Result<CmdResult> {
    let file = File::create(path).map_err(CheatnoteError::Io)?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, store.notes())?;
    writer.flush().map_err(CheatnoteError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} notes to {} in CSV format",
        store.len(),
        path.display()
    )));
    Ok(result)
}

/// Text fields are always quoted; timestamps are epoch seconds.
pub fn write_csv<W: Write>(out: &mut W, notes: &[Note]) -> Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for note in notes {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            note.id,
            quote(&note.title),
            quote(&note.content),
            quote(&note.tags),
            note.created_at.timestamp(),
            note.modified_at.timestamp()
        )?;
    }
    Ok(())
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
