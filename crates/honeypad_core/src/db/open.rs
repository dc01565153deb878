//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure pragmas, busy timeout and the `LOCALIZED` collation.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have the store collator registered.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use crate::collation::register_collation;
use crate::config::StoreOptions;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Opens (or creates) a notes database file and applies pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>, options: &StoreOptions) -> DbResult<Connection> {
    open_with("file", || Connection::open(path), options)
}

/// Opens an in-memory notes database and applies all migrations.
///
/// Every call returns an independent, empty database.
pub fn open_db_in_memory(options: &StoreOptions) -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory, options)
}

fn open_with(
    mode: &'static str,
    opener: impl FnOnce() -> rusqlite::Result<Connection>,
    options: &StoreOptions,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match opener() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match prepare_connection(&mut conn, options) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Brings a caller-opened connection to the state `open_db` returns:
/// busy timeout set, title collation registered, migrations applied.
pub fn prepare_connection(conn: &mut Connection, options: &StoreOptions) -> DbResult<()> {
    conn.busy_timeout(options.busy_timeout)?;
    register_collation(conn, &options.collator).map_err(DbError::Collation)?;
    apply_migrations(conn)?;
    Ok(())
}
