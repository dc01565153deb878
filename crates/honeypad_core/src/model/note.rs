//! Note records, write fields and column layout.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes afterwards.
//! - Exposed records carry identifier, title and body in that fixed order.

use serde::{Deserialize, Serialize};

/// Stable note identifier assigned by the store.
pub type NoteId = i64;

/// Persisted column holding the note id.
pub const KEY_ID: &str = "_id";
/// Persisted column holding the note title.
pub const KEY_TITLE: &str = "title";
/// Persisted column holding the note body.
pub const KEY_BODY: &str = "body";

pub const ID_COLUMN: usize = 0;
pub const TITLE_COLUMN: usize = 1;
pub const BODY_COLUMN: usize = 2;

/// Logical note columns in their fixed exposure order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteColumn {
    Id,
    Title,
    Body,
}

impl NoteColumn {
    pub const ALL: [NoteColumn; 3] = [NoteColumn::Id, NoteColumn::Title, NoteColumn::Body];

    /// Persisted column name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => KEY_ID,
            Self::Title => KEY_TITLE,
            Self::Body => KEY_BODY,
        }
    }

    /// Position of the column in every exposed record.
    pub fn index(self) -> usize {
        match self {
            Self::Id => ID_COLUMN,
            Self::Title => TITLE_COLUMN,
            Self::Body => BODY_COLUMN,
        }
    }
}

/// One fully persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
}

/// Bounded projection (id + title) used by list rows and widget items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
}

/// Write model for insert and update.
///
/// On insert an absent field is stored as the empty string. On update an
/// absent field keeps its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFields {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl NoteFields {
    /// Fields with both title and body set.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: None,
        }
    }

    pub fn body(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: Some(body.into()),
        }
    }

    pub(crate) fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub(crate) fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}
