//! Structured scan results. The walker never prints; rendering these is
//! the caller's concern.

use std::fmt;

/// Results for one table.
#[derive(Debug, Clone, Default)]
pub struct TableReport {
    pub table: String,
    pub text_columns: Vec<String>,
    pub rows_examined: u64,
    /// Affected-row total reported by the driver across this table's
    /// updates.
    pub rows_updated: u64,
    pub errors: Vec<String>,
}

impl TableReport {
    pub fn new(table: String, text_columns: Vec<String>) -> Self {
        Self {
            table,
            text_columns,
            ..Default::default()
        }
    }
}

/// Results for a whole database scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub tables: Vec<TableReport>,
}

impl ScanReport {
    pub fn rows_examined(&self) -> u64 {
        self.tables.iter().map(|t| t.rows_examined).sum()
    }

    pub fn rows_updated(&self) -> u64 {
        self.tables.iter().map(|t| t.rows_updated).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.tables.iter().any(|t| !t.errors.is_empty())
    }
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text_columns.is_empty() {
            writeln!(f, "`{}`: no text columns", self.table)?;
        } else {
            writeln!(f, "`{}`: {}", self.table, self.text_columns.join(", "))?;
        }
        writeln!(f, "{} / {}", self.rows_examined, self.rows_updated)?;
        for err in &self.errors {
            writeln!(f, "ERROR {err}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.tables {
            write!(f, "{table}")?;
        }
        Ok(())
    }
}
