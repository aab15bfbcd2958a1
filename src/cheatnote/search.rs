//! # Match Engine
//!
//! Predicates that decide whether a note belongs in a listing. A note is
//! selected when both its content filter and its tag filter hold; an absent
//! or empty filter matches everything.
//!
//! ## Tag Filter
//!
//! The filter is a comma-separated list. Every non-empty token must occur
//! somewhere in the note's tag text, compared case-insensitively. This is
//! substring containment, not tag equality: `git` matches a note tagged
//! `github`.
//!
//! ## Content Filter
//!
//! Title, content and tags are tried in that order and the first hit wins.
//!
//! - Literal mode: substring containment, or whole-field equality with
//!   `exact_match`, optionally case-insensitive. A case-insensitive pattern
//!   longer than `MAX_SEARCH_LEN` bytes matches nothing.
//! - Regex mode: `word_boundary` wraps the pattern in `\b` anchors;
//!   `multiline` makes `^`/`$` match at line breaks. Without it `.` also
//!   matches newlines and anchors only match at the ends of a field. A
//!   pattern that fails to compile matches nothing.

use crate::model::{Note, MAX_SEARCH_LEN, MAX_TAGS_LEN};
use log::debug;
use regex::{Regex, RegexBuilder};

/// Longest regex source accepted before it is treated as matching nothing.
const MAX_REGEX_LEN: usize = MAX_SEARCH_LEN * 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub pattern: Option<String>,
    pub tags: Option<String>,
    pub regex: bool,
    pub case_insensitive: bool,
    /// Literal mode only.
    pub exact_match: bool,
    /// Regex mode only.
    pub word_boundary: bool,
    /// Regex mode only.
    pub multiline: bool,
}

impl SearchOptions {
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn regex(mut self) -> Self {
        self.regex = true;
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn exact(mut self) -> Self {
        self.exact_match = true;
        self
    }

    pub fn word_boundary(mut self) -> Self {
        self.word_boundary = true;
        self
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }
}

/// True when every token of `filter` occurs in `note_tags`.
pub fn match_tags(note_tags: &str, filter: Option<&str>) -> bool {
    let Some(filter) = filter.filter(|f| !f.is_empty()) else {
        return true;
    };
    if note_tags.is_empty() {
        return false;
    }
    if note_tags.len() >= MAX_TAGS_LEN || filter.len() >= MAX_TAGS_LEN {
        return false;
    }

    let haystack = note_tags.to_lowercase();
    filter
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .all(|token| haystack.contains(token))
}

/// One-off content check. Compiles the pattern on every call; use
/// [`ContentMatcher`] when scanning many notes.
pub fn match_content(note: &Note, opts: &SearchOptions) -> bool {
    ContentMatcher::new(opts).matches(note)
}

enum Mode {
    All,
    Nothing,
    Regex(Regex),
    Literal {
        needle: String,
        case_insensitive: bool,
        exact: bool,
    },
}

/// Content filter prepared once for a whole scan.
pub struct ContentMatcher {
    mode: Mode,
}

impl ContentMatcher {
    pub fn new(opts: &SearchOptions) -> Self {
        let pattern = match opts.pattern.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => return Self { mode: Mode::All },
        };

        let mode = if opts.regex {
            match compile(pattern, opts) {
                Some(re) => Mode::Regex(re),
                None => Mode::Nothing,
            }
        } else if opts.case_insensitive && pattern.len() > MAX_SEARCH_LEN {
            debug!("event=literal_search status=rejected reason=too_long");
            Mode::Nothing
        } else {
            let needle = if opts.case_insensitive {
                pattern.to_lowercase()
            } else {
                pattern.to_string()
            };
            Mode::Literal {
                needle,
                case_insensitive: opts.case_insensitive,
                exact: opts.exact_match,
            }
        };
        Self { mode }
    }

    pub fn matches(&self, note: &Note) -> bool {
        let fields = [&note.title, &note.content, &note.tags];
        match &self.mode {
            Mode::All => true,
            Mode::Nothing => false,
            Mode::Regex(re) => fields.iter().any(|field| re.is_match(field)),
            Mode::Literal {
                needle,
                case_insensitive,
                exact,
            } => fields.iter().any(|field| {
                let lowered;
                let field: &str = if *case_insensitive {
                    lowered = field.to_lowercase();
                    &lowered
                } else {
                    field
                };
                if *exact {
                    field == needle
                } else {
                    field.contains(needle.as_str())
                }
            }),
        }
    }
}

fn compile(pattern: &str, opts: &SearchOptions) -> Option<Regex> {
    if pattern.len() > MAX_REGEX_LEN {
        debug!("event=regex_compile status=rejected reason=too_long");
        return None;
    }
    let source = if opts.word_boundary {
        format!(r"\b(?:{})\b", pattern)
    } else {
        pattern.to_string()
    };
    match RegexBuilder::new(&source)
        .case_insensitive(opts.case_insensitive)
        .multi_line(opts.multiline)
        .dot_matches_new_line(!opts.multiline)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            debug!("event=regex_compile status=error error=\"{}\"", e);
            None
        }
    }
}

/// Combined content and tag filter applied per note during a listing.
pub struct NoteFilter {
    content: ContentMatcher,
    tags: Option<String>,
}

impl NoteFilter {
    pub fn new(opts: &SearchOptions) -> Self {
        Self {
            content: ContentMatcher::new(opts),
            tags: opts.tags.clone(),
        }
    }

    pub fn matches(&self, note: &Note) -> bool {
        self.content.matches(note) && match_tags(&note.tags, self.tags.as_deref())
    }
}
