use chrono::Utc;

use crate::driver::DriverError;
use crate::row::quote;
use crate::{Connection, Dialect, Error, Result, Row, Transaction, Value};

use std::path::Path;

/// Postgres `information_schema` types that have a serial sequence worth
/// resetting. Anything else (varchar, uuid, ...) skips the fix.
const INTEGER_TYPES: &[&str] = &["integer", "bigint", "smallint"];

/// Applies a fixture document to the database.
///
/// Rows are upserted in document order inside a single transaction: a
/// `COUNT(*)` probe on the primary key decides between INSERT and UPDATE.
/// The first failing statement rolls the whole document back; the commit
/// happens once, after the last row.
pub fn load(data: &[u8], connection: &mut dyn Connection, dialect: Dialect) -> Result<()> {
    let rows: Vec<Row> = serde_yaml::from_slice(data)?;
    tracing::debug!(rows = rows.len(), ?dialect, "loading fixture document");

    let mut tx = connection.begin().map_err(Error::Begin)?;

    for (index, row) in rows.iter().enumerate() {
        // Dropping `tx` on the error path rolls the transaction back.
        apply_row(&mut *tx, row, dialect).map_err(|source| Error::Row {
            row: index + 1,
            source,
        })?;
    }

    tx.commit().map_err(Error::Commit)
}

/// Reads a fixture file and applies it with [`load`].
pub fn load_file(
    path: impl AsRef<Path>,
    connection: &mut dyn Connection,
    dialect: Dialect,
) -> Result<()> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| Error::File {
        path: path.display().to_string(),
        source,
    })?;

    load(&data, connection, dialect)
}

/// Applies fixture files in order, stopping at the first failure.
///
/// Each file commits its own transaction, so files preceding a failing one
/// stay applied.
pub fn load_files<P: AsRef<Path>>(
    paths: &[P],
    connection: &mut dyn Connection,
    dialect: Dialect,
) -> Result<()> {
    for path in paths {
        load_file(path, connection, dialect)?;
    }

    Ok(())
}

fn apply_row(
    tx: &mut dyn Transaction,
    row: &Row,
    dialect: Dialect,
) -> std::result::Result<(), DriverError> {
    // One timestamp per row so sentinel columns within the row agree.
    let now = Utc::now();
    let table = quote(&row.table);

    let probe = format!(
        "SELECT COUNT(*) FROM {table} WHERE {}",
        row.where_clause(dialect, 0)
    );
    let count = tx.query_count(&probe, &row.pk_values())?;

    if count == 0 {
        let columns = row.insert_columns();
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(", "),
            row.insert_placeholders(dialect).join(", ")
        );
        tracing::trace!(sql = %sql, "inserting row");
        tx.execute(&sql, &row.insert_values(now))?;

        if dialect.supports_sequence_fix() && columns.first().map(String::as_str) == Some("\"id\"")
        {
            fix_sequence(tx, &row.table)?;
        }
    } else {
        let set = row.update_set(dialect);
        if set.is_empty() {
            // Primary-key-only row that already exists: nothing to update.
            tracing::trace!(table = %row.table, "row present with no non-key fields, skipping");
            return Ok(());
        }

        let sql = format!(
            "UPDATE {table} SET {} WHERE {}",
            set.join(", "),
            row.where_clause(dialect, row.update_columns_len())
        );
        tracing::trace!(sql = %sql, "updating row");
        let mut values = row.update_values(now);
        values.extend(row.pk_values());
        tx.execute(&sql, &values)?;

        if dialect.supports_sequence_fix() && row.update_columns().first() == Some(&"id") {
            fix_sequence(tx, &row.table)?;
        }
    }

    Ok(())
}

/// Resynchronizes the serial sequence behind an `id` primary key.
///
/// An explicit-value insert bypasses the sequence, so a later
/// auto-generated insert would collide with the explicit key. The declared
/// column type is probed first; non-integer keys (string, uuid) skip the
/// reset without error.
fn fix_sequence(tx: &mut dyn Transaction, table: &str) -> std::result::Result<(), DriverError> {
    let data_type = tx.query_string(
        "SELECT data_type FROM information_schema.columns \
         WHERE table_name = $1 AND column_name = 'id'",
        &[Value::Text(table.to_string())],
    )?;

    if let Some(data_type) = data_type {
        if INTEGER_TYPES.contains(&data_type.as_str()) {
            tracing::debug!(table, "resetting serial sequence");
            let sql = format!(
                "SELECT pg_catalog.setval(pg_get_serial_sequence('{table}', 'id'), \
                 (SELECT MAX(id) FROM {}))",
                quote(table)
            );
            tx.execute(&sql, &[])?;
        }
    }

    Ok(())
}
