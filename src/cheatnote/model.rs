use chrono::{DateTime, Utc};

/// Title capacity in bytes, including the terminator slot.
pub const MAX_TITLE_LEN: usize = 256;
/// Content capacity in bytes, including the terminator slot.
pub const MAX_CONTENT_LEN: usize = 8192;
/// Tags capacity in bytes, including the terminator slot.
pub const MAX_TAGS_LEN: usize = 512;
pub const MAX_SEARCH_LEN: usize = 256;

pub const INITIAL_CAPACITY: usize = 64;
pub const GROWTH_FACTOR: usize = 2;
/// Hard ceiling on the number of live notes.
pub const MAX_NOTES: usize = 1_000_000;

/// The three bounded text fields of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
    Tags,
}

impl Field {
    /// Buffer size of the field. Stored text is at most `capacity() - 1` bytes.
    pub fn capacity(self) -> usize {
        match self {
            Field::Title => MAX_TITLE_LEN,
            Field::Content => MAX_CONTENT_LEN,
            Field::Tags => MAX_TAGS_LEN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Content => "Content",
            Field::Tags => "Tags",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: u32,
    pub title: String,
    pub content: String,
    /// Raw comma-separated text, may be empty.
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Note {
    /// First line of the content, used by compact listings.
    pub fn summary(&self) -> &str {
        self.content.lines().next().unwrap_or("")
    }
}

/// A partial edit. `None` leaves the field alone.
///
/// An empty `title` or `content` is treated as not supplied, while an empty
/// `tags` clears the tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
}

impl NoteUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }
}
