//! Notes storage core for Honeypad.
//! This crate is the single source of truth for note persistence, ordering
//! and change notification.

pub mod collation;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod observer;
pub mod repo;
pub mod service;
pub mod uri;

pub use collation::{AsciiCollator, Collator, FoldingCollator, COLLATION_NAME};
pub use config::StoreOptions;
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingConfig};
pub use model::note::{Note, NoteColumn, NoteFields, NoteId, NoteSummary};
pub use observer::{ChangeObserver, ObserverId};
pub use repo::cursor::NoteCursor;
pub use repo::note_repo::{
    NoteOrder, NoteQuery, NoteRepository, RepoError, RepoResult, SqliteNoteRepository,
};
pub use service::deep_link::{parse_note_reference, resolve_deep_link, EditTarget};
pub use service::note_store::{NoteStore, SaveOutcome, StoreError, StoreResult};
pub use service::widget_feed::{WidgetFeed, WIDGET_ITEM_LIMIT};
pub use uri::{NoteUri, CONTENT_URI};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
