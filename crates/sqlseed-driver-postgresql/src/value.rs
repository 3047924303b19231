use postgres::types::{private::BytesMut, to_sql_checked, IsNull, ToSql, Type};
use sqlseed::{Value as CoreValue, ON_INSERT_NOW, ON_UPDATE_NOW};

/// Bridges a core fixture value to postgres parameter binding, matching
/// the target column type where the wire encodings differ.
#[derive(Debug)]
pub(crate) struct Value<'a>(&'a CoreValue);

impl<'a> From<&'a CoreValue> for Value<'a> {
    fn from(value: &'a CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value<'_> {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self.0 {
            CoreValue::Null => Ok(IsNull::Yes),
            CoreValue::Bool(value) => value.to_sql(ty, out),
            CoreValue::Integer(value) => match *ty {
                Type::INT2 => (*value as i16).to_sql(ty, out),
                Type::INT4 => (*value as i32).to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            CoreValue::Float(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            CoreValue::Text(value) => value.as_str().to_sql(ty, out),
            CoreValue::Timestamp(value) => match *ty {
                Type::TIMESTAMP => value.naive_utc().to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            // A sentinel outside `fields` is never resolved; it binds as
            // its literal text.
            CoreValue::InsertNow => ON_INSERT_NOW.to_sql(ty, out),
            CoreValue::UpdateNow => ON_UPDATE_NOW.to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}
