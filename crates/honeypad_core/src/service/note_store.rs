//! The notes store: sole authority over note persistence.
//!
//! # Responsibility
//! - Serve insert/query/update/delete for every caller (CLI, list view, edit
//!   view, widget feed).
//! - Signal "notes changed" to registered observers after each mutation.
//! - Surface storage failures as `StoreError`; absorb missing ids.
//!
//! # Invariants
//! - One connection, guarded by a mutex held for exactly one operation.
//! - Queries are fully materialized under the lock, so they never observe a
//!   partially applied write.
//! - Observers run after the lock is released.
//! - Notifications fire only when at least one row was written.

use crate::config::StoreOptions;
use crate::db::{open_db, open_db_in_memory, prepare_connection};
use crate::model::note::{Note, NoteFields, NoteId, NoteSummary};
use crate::observer::{ChangeObserver, ObserverId, ObserverRegistry};
use crate::repo::cursor::NoteCursor;
use crate::repo::note_repo::{
    NoteQuery, NoteRepository, RepoError, RepoResult, SqliteNoteRepository,
};
use crate::uri::NoteUri;
use log::{debug, error, info};
use rusqlite::{Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure surfaced by the store.
///
/// Missing ids never produce an error; only an unusable backing store does.
#[derive(Debug)]
pub enum StoreError {
    StorageUnavailable {
        operation: &'static str,
        source: RepoError,
    },
}

impl StoreError {
    fn unavailable(operation: &'static str, source: impl Into<RepoError>) -> Self {
        Self::StorageUnavailable {
            operation,
            source: source.into(),
        }
    }

    /// Store operation that failed (`note_insert`, `store_open`, ...).
    pub fn operation(&self) -> &'static str {
        match self {
            Self::StorageUnavailable { operation, .. } => operation,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable { operation, source } => {
                write!(f, "notes storage unavailable during {operation}: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable { source, .. } => Some(source),
        }
    }
}

/// Result of [`NoteStore::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new note was inserted.
    Created(NoteId),
    /// The existing note was updated in place.
    Updated(NoteId),
}

impl SaveOutcome {
    pub fn id(self) -> NoteId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

/// Thread-safe notes store. Share it as `Arc<NoteStore>`.
pub struct NoteStore {
    conn: Mutex<Connection>,
    observers: ObserverRegistry,
}

impl NoteStore {
    /// Opens (or creates) the notes database at `path`.
    pub fn open(path: impl AsRef<Path>, options: &StoreOptions) -> StoreResult<Self> {
        let conn = open_db(path, options).map_err(|err| StoreError::unavailable("store_open", err))?;
        Self::from_prepared(conn)
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory(options: &StoreOptions) -> StoreResult<Self> {
        let conn = open_db_in_memory(options)
            .map_err(|err| StoreError::unavailable("store_open", err))?;
        Self::from_prepared(conn)
    }

    /// Adopts a connection the caller opened, applying `options` and any
    /// pending migrations before the notes schema is checked.
    pub fn from_connection(mut conn: Connection, options: &StoreOptions) -> StoreResult<Self> {
        prepare_connection(&mut conn, options)
            .map_err(|err| StoreError::unavailable("store_open", err))?;
        Self::from_prepared(conn)
    }

    fn from_prepared(conn: Connection) -> StoreResult<Self> {
        SqliteNoteRepository::try_new(&conn)
            .map_err(|err| StoreError::unavailable("store_open", err))?;
        info!("event=store_open module=store status=ok");
        Ok(Self {
            conn: Mutex::new(conn),
            observers: ObserverRegistry::default(),
        })
    }

    /// Registers a refresh hook called after every mutation.
    pub fn subscribe(&self, observer: Arc<dyn ChangeObserver>) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Registers a refresh hook that ends once `observer` is dropped.
    pub fn subscribe_weak(&self, observer: Weak<dyn ChangeObserver>) -> ObserverId {
        self.observers.subscribe_weak(observer)
    }

    /// Removes a refresh hook. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Inserts a note; absent fields are stored as empty strings.
    pub fn insert(&self, fields: &NoteFields) -> StoreResult<NoteId> {
        self.mutate("note_insert", |repo| repo.insert_note(fields), |_| true)
    }

    /// Lists full notes as a fresh snapshot.
    pub fn query(&self, query: &NoteQuery) -> StoreResult<NoteCursor<Note>> {
        let notes = self.read("note_query", |repo| repo.list_notes(query))?;
        Ok(NoteCursor::new(notes))
    }

    /// Lists the id + title projection as a fresh snapshot.
    pub fn query_summaries(&self, query: &NoteQuery) -> StoreResult<NoteCursor<NoteSummary>> {
        let summaries = self.read("note_query_summaries", |repo| repo.list_summaries(query))?;
        Ok(NoteCursor::new(summaries))
    }

    /// Loads one note. `None` when no note has this id.
    pub fn query_by_id(&self, id: NoteId) -> StoreResult<Option<Note>> {
        self.read("note_get", |repo| repo.get_note(id))
    }

    /// Resolves an address: the collection yields every note in default
    /// order, an item yields zero or one note.
    pub fn query_uri(&self, uri: &NoteUri) -> StoreResult<NoteCursor<Note>> {
        match uri {
            NoteUri::Collection => self.query(&NoteQuery::default()),
            NoteUri::Item(id) => {
                let note = self.query_by_id(*id)?;
                Ok(NoteCursor::new(note.into_iter().collect()))
            }
        }
    }

    /// Updates the provided fields of one note. Returns rows updated (0 or 1).
    pub fn update(&self, id: NoteId, fields: &NoteFields) -> StoreResult<usize> {
        self.mutate(
            "note_update",
            |repo| repo.update_note(id, fields),
            |changed| *changed > 0,
        )
    }

    /// Deletes one note. Returns rows deleted (0 or 1).
    pub fn delete(&self, id: NoteId) -> StoreResult<usize> {
        self.mutate(
            "note_delete",
            |repo| repo.delete_note(id),
            |changed| *changed > 0,
        )
    }

    /// Deletes every listed id in one transaction and notifies once.
    ///
    /// Returns the number of notes actually deleted; ids that do not exist
    /// (or repeat) contribute nothing.
    pub fn delete_many(&self, ids: &[NoteId]) -> StoreResult<usize> {
        let started_at = Instant::now();
        let result = {
            let mut conn = self.lock();
            delete_in_transaction(&mut conn, ids)
        };
        let deleted = self.finish("note_delete_many", started_at, result)?;
        if deleted > 0 {
            self.observers.notify_all();
        }
        Ok(deleted)
    }

    /// Deletes the note an item address points at. The collection address
    /// deletes nothing.
    pub fn delete_uri(&self, uri: &NoteUri) -> StoreResult<usize> {
        match uri {
            NoteUri::Collection => Ok(0),
            NoteUri::Item(id) => self.delete(*id),
        }
    }

    /// Persists an edit form: updates `current` when it still exists,
    /// otherwise inserts a new note.
    pub fn save(&self, current: Option<NoteId>, fields: &NoteFields) -> StoreResult<SaveOutcome> {
        if let Some(id) = current {
            if self.update(id, fields)? > 0 {
                return Ok(SaveOutcome::Updated(id));
            }
        }
        self.insert(fields).map(SaveOutcome::Created)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-operation drops its transaction, which rolls back.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<T>(
        &self,
        operation: &'static str,
        run: impl FnOnce(&SqliteNoteRepository<'_>) -> RepoResult<T>,
    ) -> StoreResult<T> {
        let started_at = Instant::now();
        let result = {
            let conn = self.lock();
            run(&SqliteNoteRepository::new(&conn))
        };
        self.finish(operation, started_at, result)
    }

    fn mutate<T>(
        &self,
        operation: &'static str,
        run: impl FnOnce(&SqliteNoteRepository<'_>) -> RepoResult<T>,
        changed: impl FnOnce(&T) -> bool,
    ) -> StoreResult<T> {
        let value = self.read(operation, run)?;
        if changed(&value) {
            self.observers.notify_all();
        }
        Ok(value)
    }

    fn finish<T>(
        &self,
        operation: &'static str,
        started_at: Instant,
        result: RepoResult<T>,
    ) -> StoreResult<T> {
        let duration_ms = started_at.elapsed().as_millis();
        match result {
            Ok(value) => {
                debug!("event={operation} module=store status=ok duration_ms={duration_ms}");
                Ok(value)
            }
            Err(err) => {
                error!(
                    "event={operation} module=store status=error duration_ms={duration_ms} error_code=storage_unavailable error={err}"
                );
                Err(StoreError::unavailable(operation, err))
            }
        }
    }
}

fn delete_in_transaction(conn: &mut Connection, ids: &[NoteId]) -> RepoResult<usize> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut deleted = 0;
    {
        let repo = SqliteNoteRepository::new(&tx);
        for id in ids {
            deleted += repo.delete_note(*id)?;
        }
    }
    tx.commit()?;
    Ok(deleted)
}
