//! The execution seam between the walker and a concrete database driver.

use crate::error::DbError;

/// One cell as it travels across the seam: raw bytes or SQL `NULL`. No
/// charset transcoding happens on either side — the rewriter operates on
/// bytes and the driver binds bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Bytes(Vec<u8>),
}

impl SqlValue {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            SqlValue::Null => None,
            SqlValue::Bytes(b) => Some(b),
        }
    }
}

pub type Row = Vec<SqlValue>;

/// A materialized query result with column names in projection order.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    /// Index of a named column.
    pub fn column_index(&self, name: &str) -> Result<usize, DbError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DbError::MissingColumn(name.to_string()))
    }
}

/// Minimal surface the walker needs from one MySQL-dialect connection.
///
/// Values travel exclusively through `params`; the walker never
/// interpolates them into SQL text. Results are materialized before the
/// walker issues further statements, so an implementation never sees
/// interleaved queries on a live result set.
pub trait Executor {
    fn query(&mut self, sql: &str) -> Result<ResultSet, DbError>;

    /// Run a statement with positional parameters; returns affected rows.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64, DbError>;
}

/// Backtick-quote an identifier, doubling embedded backticks.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
