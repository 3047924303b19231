use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Dialect, Value};

/// Wraps an identifier in double quotes.
///
/// Quoting is dialect-independent; every identifier is emitted quoted
/// regardless of flavor.
pub(crate) fn quote(ident: &str) -> String {
    format!("\"{ident}\"")
}

/// A single declared row in a fixture document.
///
/// `pk` and `fields` preserve document order; placeholder positions and
/// bound value slices rely on that order being stable, which `IndexMap`
/// guarantees for the lifetime of the row.
#[derive(Debug, Deserialize)]
pub struct Row {
    /// Target table name, emitted quoted.
    pub table: String,

    /// Primary key columns; non-empty, defines row identity.
    pub pk: IndexMap<String, Value>,

    /// Non-key columns; may be empty (primary-key-only rows are legal).
    #[serde(default)]
    pub fields: IndexMap<String, Value>,
}

impl Row {
    /// Quoted column list for an INSERT: primary key columns followed by
    /// field columns, excluding `ON_UPDATE_NOW()` columns (those stay
    /// null/default until the row is first updated).
    pub fn insert_columns(&self) -> Vec<String> {
        self.pk
            .keys()
            .chain(
                self.fields
                    .iter()
                    .filter(|(_, value)| !matches!(value, Value::UpdateNow))
                    .map(|(column, _)| column),
            )
            .map(|column| quote(column))
            .collect()
    }

    /// One placeholder per insert column, positioned consistently with
    /// [`Row::insert_values`].
    pub fn insert_placeholders(&self, dialect: Dialect) -> Vec<String> {
        (0..self.insert_columns().len())
            .map(|index| dialect.placeholder(index))
            .collect()
    }

    /// Values aligned with [`Row::insert_columns`]; `ON_INSERT_NOW()` in
    /// `fields` resolves to `now`. Primary key values pass through
    /// untouched so they always line up with the unconditional pk columns.
    pub fn insert_values(&self, now: DateTime<Utc>) -> Vec<Value> {
        self.pk
            .values()
            .cloned()
            .chain(self.fields.values().filter_map(|value| value.for_insert(now)))
            .collect()
    }

    /// Unquoted field column names participating in an UPDATE, excluding
    /// `ON_INSERT_NOW()` columns (an update never rewrites the creation
    /// timestamp).
    pub fn update_columns(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, value)| !matches!(value, Value::InsertNow))
            .map(|(column, _)| column.as_str())
            .collect()
    }

    /// Number of UPDATE SET columns; the WHERE clause placeholder numbering
    /// continues from this offset for globally-numbered dialects.
    pub fn update_columns_len(&self) -> usize {
        self.update_columns().len()
    }

    /// `"column" = <placeholder>` fragments for the SET clause, numbered
    /// from the first position.
    pub fn update_set(&self, dialect: Dialect) -> Vec<String> {
        self.update_columns()
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{} = {}", quote(column), dialect.placeholder(index)))
            .collect()
    }

    /// Values aligned with [`Row::update_columns`]; `ON_UPDATE_NOW()`
    /// resolves to `now`.
    pub fn update_values(&self, now: DateTime<Utc>) -> Vec<Value> {
        self.fields
            .values()
            .filter_map(|value| value.for_update(now))
            .collect()
    }

    /// Primary key values in declaration order, used for the existence
    /// probe and appended after update values for the WHERE clause.
    pub fn pk_values(&self) -> Vec<Value> {
        self.pk.values().cloned().collect()
    }

    /// Conjunction of `"column" = <placeholder>` over the primary key,
    /// numbering continuing from `offset`.
    ///
    /// `offset` is 0 for the standalone existence probe and
    /// [`Row::update_columns_len`] when appended to an UPDATE, so one
    /// continuous numbering run covers SET and WHERE.
    pub fn where_clause(&self, dialect: Dialect, offset: usize) -> String {
        self.pk
            .keys()
            .enumerate()
            .map(|(index, column)| {
                format!("{} = {}", quote(column), dialect.placeholder(offset + index))
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}
