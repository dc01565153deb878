use honeypad_core::db::migrations::latest_version;
use honeypad_core::db::{open_db, open_db_in_memory, DbError};
use honeypad_core::{
    NoteFields, NoteQuery, NoteStore, RepoError, SqliteNoteRepository, StoreError, StoreOptions,
};
use rusqlite::Connection;
use std::time::Duration;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory(&StoreOptions::default()).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "notes");
    assert!(SqliteNoteRepository::try_new(&conn).is_ok());
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    let conn_first = open_db(&path, &StoreOptions::default()).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path, &StoreOptions::default()).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "notes");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path, &StoreOptions::default()).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_open_surfaces_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened as a database file.
    let err = match NoteStore::open(dir.path(), &StoreOptions::default()) {
        Ok(_) => panic!("opening a directory must fail"),
        Err(err) => err,
    };

    let StoreError::StorageUnavailable { operation, source } = err;
    assert_eq!(operation, "store_open");
    assert!(matches!(source, RepoError::Db(_)));
}

#[test]
fn store_rejects_connection_with_incomplete_notes_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE notes (_id INTEGER PRIMARY KEY, title TEXT NOT NULL DEFAULT '');
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    let err = match NoteStore::from_connection(conn, &StoreOptions::default()) {
        Ok(_) => panic!("incomplete schema must be rejected"),
        Err(err) => err,
    };
    assert!(matches!(
        err,
        StoreError::StorageUnavailable {
            source: RepoError::MissingRequiredColumn {
                table: "notes",
                column: "body"
            },
            ..
        }
    ));
}

#[test]
fn adopted_connection_serves_collated_queries() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE notes (
            _id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL DEFAULT '',
            body TEXT NOT NULL DEFAULT ''
        );",
    )
    .unwrap();

    let store = NoteStore::from_connection(conn, &StoreOptions::default()).unwrap();
    for title in ["banana", "Apple", "cherry"] {
        store.insert(&NoteFields::title(title)).unwrap();
    }

    let titles: Vec<String> = store
        .query(&NoteQuery::default())
        .unwrap()
        .map(|note| note.title)
        .collect();
    assert_eq!(titles, vec!["Apple", "banana", "cherry"]);
}

#[test]
fn adopting_empty_connection_creates_schema() {
    let conn = Connection::open_in_memory().unwrap();
    let store = NoteStore::from_connection(conn, &StoreOptions::default()).unwrap();
    let id = store.insert(&NoteFields::new("first", "note")).unwrap();
    assert_eq!(store.query_by_id(id).unwrap().unwrap().body, "note");
}

#[test]
fn busy_timeout_option_reaches_connection() {
    let options = StoreOptions::default().with_busy_timeout(Duration::from_millis(250));
    let conn = open_db_in_memory(&options).unwrap();

    let timeout_ms: i64 = conn
        .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(timeout_ms, 250);
}

#[test]
fn ids_survive_restart_and_are_never_reused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    let (kept, deleted) = {
        let store = NoteStore::open(&path, &StoreOptions::default()).unwrap();
        let kept = store.insert(&NoteFields::new("kept", "stays")).unwrap();
        let deleted = store.insert(&NoteFields::new("gone", "removed")).unwrap();
        assert_eq!(store.delete(deleted).unwrap(), 1);
        (kept, deleted)
    };

    let store = NoteStore::open(&path, &StoreOptions::default()).unwrap();
    let reloaded = store.query_by_id(kept).unwrap().unwrap();
    assert_eq!(reloaded.title, "kept");
    assert_eq!(reloaded.body, "stays");

    let fresh = store.insert(&NoteFields::new("fresh", "")).unwrap();
    assert!(fresh > deleted, "id {fresh} reused a deleted id");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
