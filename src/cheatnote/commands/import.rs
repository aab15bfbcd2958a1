use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CheatnoteError, Result};
use crate::store::NoteStore;
use std::fs;
use std::path::Path;

/// One parsed CSV record and the line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Imports notes from a CSV export. Rows that cannot become notes are
/// skipped with a warning; every imported note gets a fresh id.
///
/// Without `merge` the store is emptied first, id numbering carries on.
pub fn run(store: &mut NoteStore, path: &Path, merge: bool) -> Result<CmdResult> {
    let text = fs::read_to_string(path).map_err(CheatnoteError::Io)?;
    let rows = parse_csv(&text)?;

    if !merge {
        store.clear();
    }

    let mut result = CmdResult::default();
    let mut imported = Vec::new();
    let mut errors = 0usize;

    for (i, row) in rows.iter().enumerate() {
        if i == 0 && is_header(row) {
            continue;
        }
        if row.fields.len() == 1 && row.fields[0].trim().is_empty() {
            continue;
        }
        if row.fields.len() < 3 {
            result.add_message(CmdMessage::warning(format!(
                "Skipping malformed line {}",
                row.line
            )));
            errors += 1;
            continue;
        }

        let title = row.fields[1].as_str();
        let content = row.fields[2].as_str();
        let tags = row.fields.get(3).map(String::as_str).filter(|t| !t.is_empty());
        if title.is_empty() || content.is_empty() {
            result.add_message(CmdMessage::warning(format!(
                "Skipping line {} - missing title or content",
                row.line
            )));
            errors += 1;
            continue;
        }

        match store.add(title, content, tags) {
            Ok(id) => {
                if let Some(note) = store.get(id) {
                    imported.push(note.clone());
                }
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                result.add_message(CmdMessage::warning(format!(
                    "Failed to import line {}: {}",
                    row.line, e
                )));
                errors += 1;
            }
        }
    }

    let mut summary = format!(
        "Successfully imported {} notes from {}",
        imported.len(),
        path.display()
    );
    if errors > 0 {
        summary.push_str(&format!(" ({} errors)", errors));
    }
    result.add_message(CmdMessage::success(summary));
    Ok(result.with_affected_notes(imported))
}

fn is_header(row: &CsvRow) -> bool {
    row.fields.len() >= 3
        && row.fields[0].trim().eq_ignore_ascii_case("id")
        && row.fields[1].trim().eq_ignore_ascii_case("title")
        && row.fields[2].trim().eq_ignore_ascii_case("content")
}

/// Splits CSV text into rows.
///
/// Quoted fields may contain commas, newlines and `""` escapes. Whitespace
/// before an opening quote is ignored.
pub fn parse_csv(text: &str) -> Result<Vec<CsvRow>> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut was_quoted = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if !was_quoted && field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
                was_quoted = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                was_quoted = false;
            }
            '\n' => {
                if !was_quoted && field.ends_with('\r') {
                    field.pop();
                }
                fields.push(std::mem::take(&mut field));
                rows.push(CsvRow {
                    line: row_start,
                    fields: std::mem::take(&mut fields),
                });
                was_quoted = false;
                line += 1;
                row_start = line;
            }
            '\r' if was_quoted => {}
            _ if was_quoted => {
                // text after a closing quote is dropped
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CheatnoteError::Csv {
            line: row_start,
            reason: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !fields.is_empty() || was_quoted {
        fields.push(field);
        rows.push(CsvRow {
            line: row_start,
            fields,
        });
    }
    Ok(rows)
}
