use crate::driver::DriverError;

/// Errors produced while loading fixture documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document failed to deserialize; no database work was attempted.
    #[error("error parsing fixture document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The driver failed to open the document transaction.
    #[error("error beginning transaction: {0}")]
    Begin(#[source] DriverError),

    /// A probe, insert, update, or sequence-fix statement failed. `row` is
    /// the 1-based index of the offending row; the transaction has been
    /// rolled back.
    #[error("error loading row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: DriverError,
    },

    /// The final commit failed after an attempted rollback.
    #[error("error committing transaction: {0}")]
    Commit(#[source] DriverError),

    /// A fixture file could not be read.
    #[error("error loading file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A Result type alias that uses sqlseed's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
