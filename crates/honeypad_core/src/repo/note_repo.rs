//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `notes` table.
//! - Build listing queries (filter, collated ordering, pagination).
//!
//! # Invariants
//! - Title ordering always uses `COLLATE LOCALIZED` with `_id` as tie-break.
//! - Update/delete report affected rows; zero means the id did not exist.

use crate::collation::COLLATION_NAME;
use crate::db::DbError;
use crate::model::note::{Note, NoteColumn, NoteFields, NoteId, NoteSummary, KEY_ID, KEY_TITLE};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTES_TABLE: &str = "notes";
/// Leading columns of [`NoteColumn::ALL`], so indexes stay valid.
const SUMMARY_COLUMNS: [NoteColumn; 2] = [NoteColumn::Id, NoteColumn::Title];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Ordering for bulk listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteOrder {
    /// Collated title, ascending. The default listing order.
    #[default]
    TitleAsc,
    TitleDesc,
    /// Insertion order.
    IdAsc,
    IdDesc,
}

impl NoteOrder {
    fn sql(self) -> String {
        match self {
            Self::TitleAsc => format!("{KEY_TITLE} COLLATE {COLLATION_NAME} ASC, {KEY_ID} ASC"),
            Self::TitleDesc => {
                format!("{KEY_TITLE} COLLATE {COLLATION_NAME} DESC, {KEY_ID} DESC")
            }
            Self::IdAsc => format!("{KEY_ID} ASC"),
            Self::IdDesc => format!("{KEY_ID} DESC"),
        }
    }
}

/// Filter, ordering and pagination for bulk listings.
///
/// `NoteQuery::default()` returns every note in collated title order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    /// Substring match on the title through SQLite `LIKE`: ASCII letters
    /// match case-insensitively, every other character matches exactly.
    pub title_contains: Option<String>,
    pub order: NoteOrder,
    /// Maximum rows to return; `None` returns all rows.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: u32,
}

impl NoteQuery {
    pub fn title_contains(mut self, needle: impl Into<String>) -> Self {
        self.title_contains = Some(needle.into());
        self
    }

    pub fn order(mut self, order: NoteOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }
}

/// Repository interface for note CRUD operations.
pub trait NoteRepository {
    /// Inserts one note and returns its store-assigned id.
    fn insert_note(&self, fields: &NoteFields) -> RepoResult<NoteId>;
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    fn list_notes(&self, query: &NoteQuery) -> RepoResult<Vec<Note>>;
    /// Lists the id + title projection using the same query semantics.
    fn list_summaries(&self, query: &NoteQuery) -> RepoResult<Vec<NoteSummary>>;
    /// Replaces provided fields; returns the number of rows updated.
    fn update_note(&self, id: NoteId, fields: &NoteFields) -> RepoResult<usize>;
    /// Deletes one note; returns the number of rows deleted.
    fn delete_note(&self, id: NoteId) -> RepoResult<usize>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Wraps a connection already validated by [`Self::try_new`] or opened
    /// through [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Constructs a repository after checking the notes schema is in place.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_note_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn select<T>(
        &self,
        columns: &[NoteColumn],
        query: &NoteQuery,
        map_row: impl Fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> RepoResult<Vec<T>> {
        let mut sql = format!("SELECT {} FROM {NOTES_TABLE}", column_list(columns));
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(needle) = query.title_contains.as_deref() {
            sql.push_str(&format!(" WHERE {KEY_TITLE} LIKE ? ESCAPE '\\'"));
            bind_values.push(Value::Text(like_pattern(needle)));
        }

        sql.push_str(" ORDER BY ");
        sql.push_str(&query.order.sql());

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(map_row(row)?);
        }
        Ok(items)
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&self, fields: &NoteFields) -> RepoResult<NoteId> {
        self.conn.execute(
            "INSERT INTO notes (title, body) VALUES (?1, ?2);",
            params![fields.title_or_empty(), fields.body_or_empty()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let sql = format!(
            "SELECT {} FROM {NOTES_TABLE} WHERE {KEY_ID} = ?1;",
            column_list(&NoteColumn::ALL)
        );
        let note = self
            .conn
            .query_row(&sql, [id], parse_note_row)
            .optional()?;
        Ok(note)
    }

    fn list_notes(&self, query: &NoteQuery) -> RepoResult<Vec<Note>> {
        self.select(&NoteColumn::ALL, query, parse_note_row)
    }

    fn list_summaries(&self, query: &NoteQuery) -> RepoResult<Vec<NoteSummary>> {
        self.select(&SUMMARY_COLUMNS, query, |row| {
            Ok(NoteSummary {
                id: row.get(NoteColumn::Id.index())?,
                title: row.get(NoteColumn::Title.index())?,
            })
        })
    }

    fn update_note(&self, id: NoteId, fields: &NoteFields) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = COALESCE(?2, title),
                body = COALESCE(?3, body)
             WHERE _id = ?1;",
            params![id, fields.title.as_deref(), fields.body.as_deref()],
        )?;
        Ok(changed)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE _id = ?1;", [id])?;
        Ok(changed)
    }
}

fn parse_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(NoteColumn::Id.index())?,
        title: row.get(NoteColumn::Title.index())?,
        body: row.get(NoteColumn::Body.index())?,
    })
}

fn column_list(columns: &[NoteColumn]) -> String {
    columns
        .iter()
        .map(|column| column.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn ensure_note_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, NOTES_TABLE)? {
        return Err(RepoError::MissingRequiredTable(NOTES_TABLE));
    }

    for column in NoteColumn::ALL.map(NoteColumn::name) {
        if !table_has_column(conn, NOTES_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: NOTES_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
