//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the note data access contract.
//! - Isolate SQLite query details from the store service.
//!
//! # Invariants
//! - Missing ids are not errors: reads return `None`/empty and writes return
//!   a zero row count.
//! - Only transport or schema failures surface as `RepoError`.

pub mod cursor;
pub mod note_repo;
