//! Durable key-value storage for the application's data.
//!
//! The storage only knows about string keys and string values, the callers
//! decide how values are serialized.

use std::fmt::Debug;

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// A durable store of string values indexed by string keys.
pub trait Storage: Debug + Send {
    /// Get the value stored under `key`, or `None` if nothing has been stored yet.
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be written to.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Key-value storage backed by a table in a SQLite database.
#[derive(Debug)]
pub struct SQLiteStorage {
    connection: Connection,
}

impl SQLiteStorage {
    /// Create a new storage backed by `connection`, creating the storage table if needed.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_storage_table(&connection)?;

        Ok(Self { connection })
    }
}

impl Storage for SQLiteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .query_row(
                "SELECT value FROM storage WHERE key = :key",
                &[(":key", key)],
                |row| row.get(0),
            )
            .optional()
            .map_err(|error| Error::StorageError(error.to_string()))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection
            .execute(
                "INSERT INTO storage (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                (key, value),
            )
            .map(|_| ())
            .map_err(|error| Error::StorageError(error.to_string()))
    }
}

/// Create the key-value table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_storage_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}
