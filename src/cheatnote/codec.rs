//! # Record Codec
//!
//! Fixed-size binary shape of a note plus the bounded string primitives the
//! store relies on.
//!
//! ## File Layout
//!
//! ```text
//! header  : magic "CHNT" | version u32 | record_count u64 | next_id u32
//! record  : id u32 | title [u8; 256] | content [u8; 8192] | tags [u8; 512]
//!           | created_at i64 | modified_at i64
//! ```
//!
//! Integers are little-endian and records carry no padding, so a file written
//! on one platform reads back on any other. Text buffers are NUL-padded and
//! always hold at least one terminator byte.

use crate::error::{CheatnoteError, Result};
use crate::model::{Field, Note, MAX_CONTENT_LEN, MAX_NOTES, MAX_TAGS_LEN, MAX_TITLE_LEN};
use chrono::{DateTime, Utc};
use thiserror::Error;

pub const MAGIC: [u8; 4] = *b"CHNT";
pub const FORMAT_VERSION: u32 = 1;

pub const HEADER_SIZE: usize = 4 + 4 + 8 + 4;
pub const RECORD_SIZE: usize = 4 + MAX_TITLE_LEN + MAX_CONTENT_LEN + MAX_TAGS_LEN + 8 + 8;

const TITLE_OFFSET: usize = 4;
const CONTENT_OFFSET: usize = TITLE_OFFSET + MAX_TITLE_LEN;
const TAGS_OFFSET: usize = CONTENT_OFFSET + MAX_CONTENT_LEN;
const CREATED_OFFSET: usize = TAGS_OFFSET + MAX_TAGS_LEN;
const MODIFIED_OFFSET: usize = CREATED_OFFSET + 8;

/// Copies at most `cap - 1` bytes of `src`, backing off to a char boundary.
pub fn bounded_copy(src: &str, cap: usize) -> String {
    if cap == 0 {
        return String::new();
    }
    let limit = cap - 1;
    if src.len() <= limit {
        return src.to_string();
    }
    let mut end = limit;
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    src[..end].to_string()
}

pub fn trim_field(value: &str) -> &str {
    value.trim()
}

/// Rejects a value that would not fit its fixed buffer with a terminator.
pub fn validate_field(field: Field, value: &str) -> Result<()> {
    let cap = field.capacity();
    if value.len() >= cap {
        return Err(CheatnoteError::InvalidInput(format!(
            "{} too long ({} bytes, max {})",
            field.name(),
            value.len(),
            cap - 1
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub record_count: u64,
    pub next_id: u32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderFault {
    #[error("unrecognized file signature")]
    BadMagic,
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u32),
    #[error("declared record count {0} exceeds limit")]
    TooManyRecords(u64),
    #[error("next id is zero")]
    ZeroNextId,
}

pub fn encode_header(header: &Header) -> [u8; HEADER_SIZE] {
    let mut out = [0u8; HEADER_SIZE];
    out[0..4].copy_from_slice(&MAGIC);
    out[4..8].copy_from_slice(&FORMAT_VERSION.to_le_bytes());
    out[8..16].copy_from_slice(&header.record_count.to_le_bytes());
    out[16..20].copy_from_slice(&header.next_id.to_le_bytes());
    out
}

pub fn decode_header(bytes: &[u8; HEADER_SIZE]) -> std::result::Result<Header, HeaderFault> {
    if bytes[0..4] != MAGIC {
        return Err(HeaderFault::BadMagic);
    }
    let version = u32::from_le_bytes(le4(&bytes[4..8]));
    if version != FORMAT_VERSION {
        return Err(HeaderFault::UnsupportedVersion(version));
    }
    let record_count = u64::from_le_bytes(le8(&bytes[8..16]));
    let next_id = u32::from_le_bytes(le4(&bytes[16..20]));

    if record_count > MAX_NOTES as u64 {
        return Err(HeaderFault::TooManyRecords(record_count));
    }
    if next_id == 0 {
        return Err(HeaderFault::ZeroNextId);
    }
    Ok(Header {
        record_count,
        next_id,
    })
}

pub fn encode_record(note: &Note) -> Vec<u8> {
    let mut out = vec![0u8; RECORD_SIZE];
    out[0..4].copy_from_slice(&note.id.to_le_bytes());
    put_text(&mut out[TITLE_OFFSET..CONTENT_OFFSET], &note.title);
    put_text(&mut out[CONTENT_OFFSET..TAGS_OFFSET], &note.content);
    put_text(&mut out[TAGS_OFFSET..CREATED_OFFSET], &note.tags);
    out[CREATED_OFFSET..MODIFIED_OFFSET].copy_from_slice(&note.created_at.timestamp().to_le_bytes());
    out[MODIFIED_OFFSET..RECORD_SIZE].copy_from_slice(&note.modified_at.timestamp().to_le_bytes());
    out
}

/// A decoded record plus whether it looked damaged.
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    pub note: Note,
    pub suspicious: bool,
}

/// Decodes one record. Damaged ids or timestamps are flagged, never rejected.
pub fn decode_record(bytes: &[u8]) -> DecodedRecord {
    debug_assert_eq!(bytes.len(), RECORD_SIZE);

    let id = u32::from_le_bytes(le4(&bytes[0..4]));
    let created = i64::from_le_bytes(le8(&bytes[CREATED_OFFSET..MODIFIED_OFFSET]));
    let modified = i64::from_le_bytes(le8(&bytes[MODIFIED_OFFSET..RECORD_SIZE]));

    let (created_at, created_ok) = to_datetime(created);
    let (modified_at, modified_ok) = to_datetime(modified);

    let note = Note {
        id,
        title: take_text(&bytes[TITLE_OFFSET..CONTENT_OFFSET]),
        content: take_text(&bytes[CONTENT_OFFSET..TAGS_OFFSET]),
        tags: take_text(&bytes[TAGS_OFFSET..CREATED_OFFSET]),
        created_at,
        modified_at,
    };

    DecodedRecord {
        note,
        suspicious: id == 0 || created < 0 || modified < 0 || !created_ok || !modified_ok,
    }
}

fn put_text(slot: &mut [u8], value: &str) {
    let bounded = bounded_copy(value, slot.len());
    slot[..bounded.len()].copy_from_slice(bounded.as_bytes());
}

/// Reads up to the first NUL, never past the terminator slot.
fn take_text(slot: &[u8]) -> String {
    let usable = &slot[..slot.len() - 1];
    let end = usable.iter().position(|&b| b == 0).unwrap_or(usable.len());
    let text = String::from_utf8_lossy(&usable[..end]);
    // Lossy replacement can widen the text past the buffer.
    bounded_copy(&text, slot.len())
}

fn to_datetime(secs: i64) -> (DateTime<Utc>, bool) {
    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => (dt, true),
        None => (DateTime::UNIX_EPOCH, false),
    }
}

fn le4(bytes: &[u8]) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(bytes);
    out
}

fn le8(bytes: &[u8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(bytes);
    out
}
