//! Declarative database fixture loading.
//!
//! A fixture document is an ordered YAML sequence of rows; each row names
//! its table, primary key, and non-key fields. Loading upserts every row
//! in document order inside one transaction: insert if the primary key is
//! absent, update otherwise. Two sentinel field values,
//! `ON_INSERT_NOW()` and `ON_UPDATE_NOW()`, resolve to the current
//! timestamp only on the matching operation.
//!
//! Database access goes through the [`Connection`] and [`Transaction`]
//! traits; see the driver crates for SQLite and PostgreSQL
//! implementations.

pub mod driver;
pub use driver::{Connection, DriverError, Transaction};

mod dialect;
pub use dialect::Dialect;

mod error;
pub use error::{Error, Result};

mod load;
pub use load::{load, load_file, load_files};

mod row;
pub use row::Row;

mod value;
pub use value::{Value, ON_INSERT_NOW, ON_UPDATE_NOW};
