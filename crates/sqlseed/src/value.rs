use chrono::{DateTime, Utc};
use serde::de::{self, Deserialize, Deserializer, Visitor};

use std::fmt;

/// Fixture field value recognized as "set to the current timestamp on insert".
pub const ON_INSERT_NOW: &str = "ON_INSERT_NOW()";

/// Fixture field value recognized as "set to the current timestamp on update".
pub const ON_UPDATE_NOW: &str = "ON_UPDATE_NOW()";

/// A scalar value declared in a fixture document.
///
/// The sentinel literals are recognized at parse time and mapped to the
/// `InsertNow` / `UpdateNow` variants, so the engine never matches on raw
/// strings. `Timestamp` never appears in a parsed document; it is produced
/// when a sentinel resolves during row application.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    Integer(i64),

    /// 64-bit float
    Float(f64),

    /// String value
    Text(String),

    /// A resolved sentinel timestamp
    Timestamp(DateTime<Utc>),

    /// `ON_INSERT_NOW()` — current timestamp on insert, omitted on update
    InsertNow,

    /// `ON_UPDATE_NOW()` — current timestamp on update, omitted on insert
    UpdateNow,
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Resolves the insert-time projection of this value.
    ///
    /// Returns `None` when the value must be omitted from the INSERT column
    /// list entirely (`ON_UPDATE_NOW()` columns stay untouched on insert).
    pub fn for_insert(&self, now: DateTime<Utc>) -> Option<Value> {
        match self {
            Value::InsertNow => Some(Value::Timestamp(now)),
            Value::UpdateNow => None,
            other => Some(other.clone()),
        }
    }

    /// Resolves the update-time projection of this value.
    ///
    /// Returns `None` when the value must be omitted from the SET list
    /// (`ON_INSERT_NOW()` columns keep their original timestamp on update).
    pub fn for_update(&self, now: DateTime<Utc>) -> Option<Value> {
        match self {
            Value::UpdateNow => Some(Value::Timestamp(now)),
            Value::InsertNow => None,
            other => Some(other.clone()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl Visitor<'_> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a scalar fixture value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
                Ok(Value::Integer(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
                i64::try_from(v)
                    .map(Value::Integer)
                    .map_err(|_| E::custom(format!("integer {v} out of range")))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
                Ok(Value::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
                Ok(match v {
                    ON_INSERT_NOW => Value::InsertNow,
                    ON_UPDATE_NOW => Value::UpdateNow,
                    _ => Value::Text(v.to_string()),
                })
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
