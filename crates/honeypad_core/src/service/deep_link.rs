//! Deep-link resolution for the edit view.
//!
//! A link carries a note reference from outside the process (a widget click,
//! a shortcut, a CLI argument). It opens that note when it still exists and
//! falls back to the new-note flow otherwise.

use crate::model::note::{Note, NoteId};
use crate::service::note_store::{NoteStore, StoreResult};
use crate::uri::NoteUri;
use log::debug;

/// What the edit view should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Existing(Note),
    New,
}

/// Extracts a note id from a bare number or an item address.
///
/// Negative numbers (the `-1` "no id" sentinel), collection addresses and
/// anything unparseable yield `None`.
pub fn parse_note_reference(raw: &str) -> Option<NoteId> {
    let trimmed = raw.trim();
    if let Ok(id) = trimmed.parse::<NoteId>() {
        return (id >= 0).then_some(id);
    }
    NoteUri::parse(trimmed).and_then(NoteUri::id)
}

/// Resolves an optional external reference to an edit target.
///
/// Only storage failures are errors; every other miss routes to
/// [`EditTarget::New`].
pub fn resolve_deep_link(store: &NoteStore, raw: Option<&str>) -> StoreResult<EditTarget> {
    let Some(id) = raw.and_then(parse_note_reference) else {
        debug!("event=deep_link_resolve module=deep_link status=ok target=new reason=no_id");
        return Ok(EditTarget::New);
    };

    match store.query_by_id(id)? {
        Some(note) => {
            debug!("event=deep_link_resolve module=deep_link status=ok target=existing");
            Ok(EditTarget::Existing(note))
        }
        None => {
            debug!("event=deep_link_resolve module=deep_link status=ok target=new reason=missing");
            Ok(EditTarget::New)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_note_reference;

    #[test]
    fn accepts_numbers_and_item_addresses() {
        assert_eq!(parse_note_reference("12"), Some(12));
        assert_eq!(parse_note_reference(" 3 "), Some(3));
        assert_eq!(
            parse_note_reference("content://honeypad.notes/notes/9"),
            Some(9)
        );
    }

    #[test]
    fn rejects_sentinels_and_garbage() {
        assert_eq!(parse_note_reference("-1"), None);
        assert_eq!(parse_note_reference(""), None);
        assert_eq!(parse_note_reference("twelve"), None);
        assert_eq!(
            parse_note_reference("content://honeypad.notes/notes"),
            None
        );
    }
}
