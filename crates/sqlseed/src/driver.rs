use crate::Value;

/// Error produced by a driver; surfaced through [`crate::Error`] with row
/// or commit context attached by the engine.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

/// A database connection capable of opening one transaction at a time.
///
/// Implemented by the driver crates; the engine only ever talks to these
/// two traits.
pub trait Connection {
    /// Starts a transaction spanning one fixture document.
    fn begin(&mut self) -> Result<Box<dyn Transaction + '_>, DriverError>;
}

/// A single open transaction.
///
/// Dropping a transaction without calling [`Transaction::commit`] must
/// roll it back; the engine relies on this for its error paths.
pub trait Transaction {
    /// Executes a statement, returning the affected row count.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, DriverError>;

    /// Runs a query returning a single integer, e.g. a `COUNT(*)` probe.
    fn query_count(&mut self, sql: &str, params: &[Value]) -> Result<i64, DriverError>;

    /// Runs a query returning at most one row with a single text column.
    fn query_string(&mut self, sql: &str, params: &[Value])
        -> Result<Option<String>, DriverError>;

    /// Commits the transaction.
    fn commit(self: Box<Self>) -> Result<(), DriverError>;
}
