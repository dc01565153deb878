//! Note addressing.
//!
//! # Responsibility
//! - Define the collection address and per-note addresses.
//! - Parse external links (shortcuts, deep links) into addresses.
//!
//! # Invariants
//! - Parsing never fails loudly: malformed input yields `None`.
//! - `NoteUri::Item(id).to_string()` parses back to the same address.

use crate::model::note::NoteId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

/// Address of the whole notes collection.
pub const CONTENT_URI: &str = "content://honeypad.notes/notes";

static NOTE_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^content://honeypad\.notes/notes(?:/(\d{1,19}))?/?$").expect("valid note uri regex")
});

/// A collection or single-note address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteUri {
    Collection,
    Item(NoteId),
}

impl NoteUri {
    /// Parses an address string. Returns `None` for anything that is not a
    /// well-formed notes address, including ids that overflow `NoteId`.
    pub fn parse(value: &str) -> Option<Self> {
        let caps = NOTE_URI_RE.captures(value.trim())?;
        match caps.get(1) {
            Some(id) => id.as_str().parse::<NoteId>().ok().map(Self::Item),
            None => Some(Self::Collection),
        }
    }

    /// Address of one note inside the collection.
    pub fn with_appended_id(id: NoteId) -> Self {
        Self::Item(id)
    }

    pub fn id(self) -> Option<NoteId> {
        match self {
            Self::Collection => None,
            Self::Item(id) => Some(id),
        }
    }
}

impl Display for NoteUri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collection => f.write_str(CONTENT_URI),
            Self::Item(id) => write!(f, "{CONTENT_URI}/{id}"),
        }
    }
}
