//! Database connection management
//!
//! Opening, configuring and (re)creating the schema on a SQLite connection

use std::path::Path;

use rusqlite::Connection;

use crate::errors::{from_rusqlite, Result};

const SCHEMA_SQL: &str = include_str!("../../schema/schema.sql");
const DROP_SQL: &str = include_str!("../../schema/drop.sql");

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// Enforce foreign keys and use WAL journaling
pub fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")
        .map_err(from_rusqlite)
}

/// Create every table and index that does not exist yet
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL).map_err(from_rusqlite)
}

/// Drop every table. Destroys all data.
pub fn drop_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(DROP_SQL).map_err(from_rusqlite)
}
