use crate::codec::{bounded_copy, trim_field, validate_field};
use crate::error::{CheatnoteError, Result};
use crate::model::{Field, Note, NoteUpdate, GROWTH_FACTOR, INITIAL_CAPACITY, MAX_NOTES};
use chrono::{DateTime, SubsecRound, Utc};

/// The in-memory collection of live notes plus the id allocator.
///
/// Records form an unordered sequence: `delete` moves the last record into
/// the vacated slot, so positions are not stable across deletions.
///
/// Ids are unique as long as `next_id` has not wrapped all the way around
/// to an id that is still live. The `MAX_NOTES` ceiling keeps that far away
/// in practice, but a store that churns through four billion ids would
/// eventually reuse one.
#[derive(Debug, Clone)]
pub struct NoteStore {
    records: Vec<Note>,
    capacity: usize,
    next_id: u32,
    limit: usize,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            next_id: 1,
            limit: MAX_NOTES,
        }
    }

    /// An empty store that continues numbering from `next_id`.
    pub fn with_next_id(next_id: u32) -> Self {
        Self {
            next_id: next_id.max(1),
            ..Self::new()
        }
    }

    /// Rebuilds a store from records read off disk.
    pub fn from_records(records: Vec<Note>, next_id: u32) -> Result<Self> {
        if records.len() > MAX_NOTES {
            return Err(CheatnoteError::CapacityExhausted(MAX_NOTES));
        }
        let capacity = capacity_for(records.len(), MAX_NOTES);
        let mut records = records;
        records
            .try_reserve_exact(capacity - records.len())
            .map_err(|e| CheatnoteError::Allocation(e.to_string()))?;
        Ok(Self {
            records,
            capacity,
            next_id: next_id.max(1),
            limit: MAX_NOTES,
        })
    }

    /// Lowers the note ceiling, so exhaustion can be exercised cheaply.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_NOTES);
        self.capacity = self.capacity.min(self.limit);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn notes(&self) -> &[Note] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.records.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Note> {
        self.records.iter().find(|n| n.id == id)
    }

    /// Drops every record but keeps id numbering going.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Creates a note and returns its id (never 0).
    ///
    /// Fields are checked against their capacity before anything is stored;
    /// whitespace is trimmed afterwards.
    pub fn add(&mut self, title: &str, content: &str, tags: Option<&str>) -> Result<u32> {
        if title.is_empty() || content.is_empty() {
            return Err(CheatnoteError::InvalidInput(
                "Title and content are required".to_string(),
            ));
        }
        validate_field(Field::Title, title)?;
        validate_field(Field::Content, content)?;
        let tags = tags.unwrap_or("");
        validate_field(Field::Tags, tags)?;

        let title = store_text(Field::Title, title);
        let content = store_text(Field::Content, content);
        if title.is_empty() || content.is_empty() {
            return Err(CheatnoteError::InvalidInput(
                "Title and content cannot be blank".to_string(),
            ));
        }

        if self.records.len() >= self.limit {
            return Err(CheatnoteError::CapacityExhausted(self.limit));
        }
        self.ensure_room_for_one()?;

        let now = now();
        let id = self.allocate_id();
        self.records.push(Note {
            id,
            title,
            content,
            tags: store_text(Field::Tags, tags),
            created_at: now,
            modified_at: now,
        });
        Ok(id)
    }

    /// Applies `update` to the note with `id`.
    ///
    /// Every supplied field is validated before any is written, so a
    /// rejected edit leaves the note untouched. Returns `Ok(false)` when no
    /// live note has that id.
    pub fn edit(&mut self, id: u32, update: &NoteUpdate) -> Result<bool> {
        let title = supplied(update.title.as_deref());
        let content = supplied(update.content.as_deref());
        let tags = update.tags.as_deref();

        if let Some(title) = title {
            validate_field(Field::Title, title)?;
        }
        if let Some(content) = content {
            validate_field(Field::Content, content)?;
        }
        if let Some(tags) = tags {
            validate_field(Field::Tags, tags)?;
        }

        let title = title.map(|t| store_text(Field::Title, t));
        let content = content.map(|c| store_text(Field::Content, c));
        if title.as_deref() == Some("") || content.as_deref() == Some("") {
            return Err(CheatnoteError::InvalidInput(
                "Title and content cannot be blank".to_string(),
            ));
        }

        if id == 0 {
            return Ok(false);
        }
        let Some(note) = self.records.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };

        if let Some(title) = title {
            note.title = title;
        }
        if let Some(content) = content {
            note.content = content;
        }
        if let Some(tags) = tags {
            note.tags = store_text(Field::Tags, tags);
        }
        note.modified_at = now().max(note.created_at);
        Ok(true)
    }

    /// Removes the note with `id` by moving the last record into its slot.
    pub fn delete(&mut self, id: u32) -> bool {
        if id == 0 {
            return false;
        }
        match self.records.iter().position(|n| n.id == id) {
            Some(index) => {
                self.records.swap_remove(index);
                true
            }
            None => false,
        }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        if self.next_id == 0 {
            self.next_id = 1;
        }
        id
    }

    fn ensure_room_for_one(&mut self) -> Result<()> {
        if self.records.len() < self.capacity {
            return Ok(());
        }

        let grown = self
            .capacity
            .checked_mul(GROWTH_FACTOR)
            .ok_or_else(|| CheatnoteError::Allocation("capacity overflow".to_string()))?
            .min(self.limit);
        if grown <= self.capacity {
            return Err(CheatnoteError::Allocation(
                "cannot grow further".to_string(),
            ));
        }

        self.records
            .try_reserve_exact(grown - self.records.len())
            .map_err(|e| CheatnoteError::Allocation(e.to_string()))?;
        self.capacity = grown;
        Ok(())
    }
}

/// Whole seconds, the resolution records are stored at.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Capacity to allocate for `count` loaded records: at least the initial
/// capacity, doubled when that still fits under `limit`.
pub fn capacity_for(count: usize, limit: usize) -> usize {
    let mut capacity = count.max(INITIAL_CAPACITY);
    if let Some(grown) = count.checked_mul(GROWTH_FACTOR) {
        if capacity < grown && grown <= limit {
            capacity = grown;
        }
    }
    capacity
}

fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn store_text(field: Field, value: &str) -> String {
    trim_field(&bounded_copy(value, field.capacity())).to_string()
}

impl<'a> IntoIterator for &'a NoteStore {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
