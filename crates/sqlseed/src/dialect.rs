/// SQL flavor a fixture document is applied with.
///
/// The dialect decides placeholder syntax and whether the serial-sequence
/// fix runs after explicit-value writes to an `id` primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgresql,
}

impl Dialect {
    /// Maps a driver name to a dialect.
    ///
    /// Unrecognized names fall back to default placeholder behavior with no
    /// sequence fixing.
    pub fn from_name(name: &str) -> Dialect {
        match name {
            "postgres" | "postgresql" => Dialect::Postgresql,
            _ => Dialect::Sqlite,
        }
    }

    /// Placeholder token for the parameter at 0-based position `index`.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Sqlite => "?".to_string(),
            Dialect::Postgresql => format!("${}", index + 1),
        }
    }

    /// Whether explicit-value writes leave a serial sequence behind,
    /// requiring a reset after the statement.
    pub fn supports_sequence_fix(self) -> bool {
        matches!(self, Dialect::Postgresql)
    }
}
