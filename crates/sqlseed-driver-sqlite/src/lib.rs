//! SQLite driver for sqlseed, backed by rusqlite.

mod value;
pub(crate) use value::Value;

use rusqlite::{Connection as RusqliteConnection, OptionalExtension};
use sqlseed::{driver::DriverError, Connection, Transaction};

use std::path::Path;

/// A SQLite database connection.
#[derive(Debug)]
pub struct Sqlite {
    connection: RusqliteConnection,
}

impl Sqlite {
    /// Wraps an already opened rusqlite connection.
    pub fn new(connection: RusqliteConnection) -> Self {
        Self { connection }
    }

    /// Creates an in-memory SQLite database.
    pub fn in_memory() -> Result<Self, DriverError> {
        Ok(Self::new(RusqliteConnection::open_in_memory()?))
    }

    /// Opens a SQLite database at the specified file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DriverError> {
        Ok(Self::new(RusqliteConnection::open(path)?))
    }

    /// Returns the underlying rusqlite connection.
    pub fn connection(&self) -> &RusqliteConnection {
        &self.connection
    }

    /// Consumes the driver, returning the underlying rusqlite connection.
    pub fn into_connection(self) -> RusqliteConnection {
        self.connection
    }
}

impl Connection for Sqlite {
    fn begin(&mut self) -> Result<Box<dyn Transaction + '_>, DriverError> {
        let tx = self.connection.transaction()?;
        Ok(Box::new(SqliteTransaction { tx }))
    }
}

/// An open SQLite transaction. rusqlite rolls back on drop, which covers
/// the engine's error paths.
struct SqliteTransaction<'a> {
    tx: rusqlite::Transaction<'a>,
}

fn params(values: &[sqlseed::Value]) -> impl Iterator<Item = Value<'_>> {
    values.iter().map(Value::from)
}

impl Transaction for SqliteTransaction<'_> {
    fn execute(&mut self, sql: &str, values: &[sqlseed::Value]) -> Result<u64, DriverError> {
        let count = self
            .tx
            .execute(sql, rusqlite::params_from_iter(params(values)))?;
        Ok(count as u64)
    }

    fn query_count(&mut self, sql: &str, values: &[sqlseed::Value]) -> Result<i64, DriverError> {
        let count = self
            .tx
            .query_row(sql, rusqlite::params_from_iter(params(values)), |row| {
                row.get::<_, i64>(0)
            })?;
        Ok(count)
    }

    fn query_string(
        &mut self,
        sql: &str,
        values: &[sqlseed::Value],
    ) -> Result<Option<String>, DriverError> {
        let value = self
            .tx
            .query_row(sql, rusqlite::params_from_iter(params(values)), |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn commit(self: Box<Self>) -> Result<(), DriverError> {
        self.tx.commit()?;
        Ok(())
    }
}
