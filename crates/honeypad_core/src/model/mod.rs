//! Note domain model.
//!
//! # Invariants
//! - Every note is identified by a store-assigned `NoteId`.
//! - Deletion is a hard delete; no tombstone state is exposed.

pub mod note;
