use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use sqlseed::{Value as CoreValue, ON_INSERT_NOW, ON_UPDATE_NOW};

/// Bridges a core fixture value to rusqlite's parameter binding.
#[derive(Debug)]
pub(crate) struct Value<'a>(&'a CoreValue);

impl<'a> From<&'a CoreValue> for Value<'a> {
    fn from(value: &'a CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let out = match self.0 {
            CoreValue::Null => ToSqlOutput::Owned(SqlValue::Null),
            CoreValue::Bool(true) => ToSqlOutput::Owned(SqlValue::Integer(1)),
            CoreValue::Bool(false) => ToSqlOutput::Owned(SqlValue::Integer(0)),
            CoreValue::Integer(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            CoreValue::Float(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            CoreValue::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            CoreValue::Timestamp(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_rfc3339())),
            // A sentinel outside `fields` is never resolved; it binds as
            // its literal text, same as any other string.
            CoreValue::InsertNow => ToSqlOutput::Borrowed(ValueRef::Text(ON_INSERT_NOW.as_bytes())),
            CoreValue::UpdateNow => ToSqlOutput::Borrowed(ValueRef::Text(ON_UPDATE_NOW.as_bytes())),
        };

        Ok(out)
    }
}
