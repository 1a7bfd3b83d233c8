//! Table metadata discovery: row-addressing strategy and text-like column
//! classification.

use crate::error::DbError;
use crate::exec::{quote_ident, Executor, Row, SqlValue};

/// How rows of a table are re-addressed for `UPDATE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAddressing {
    PrimaryKey(Vec<String>),
    UniqueKey(Vec<String>),
    /// No usable key: the `WHERE` clause matches every selected column.
    /// Identical rows then update together, which is sound — identical
    /// content rewrites identically.
    WholeRow,
}

impl RowAddressing {
    /// Columns the `WHERE` clause binds, given the table's full column list.
    pub fn key_columns<'a>(&'a self, all: &'a [String]) -> &'a [String] {
        match self {
            RowAddressing::PrimaryKey(cols) | RowAddressing::UniqueKey(cols) => cols,
            RowAddressing::WholeRow => all,
        }
    }
}

/// Per-table scan plan. Built once per table, consumed during that table's
/// scan, discarded.
#[derive(Debug, Clone)]
pub struct TableDescriptor {
    pub name: String,
    /// All columns, in table order.
    pub columns: Vec<String>,
    /// Columns whose declared type marks them rewrite-eligible.
    pub text_columns: Vec<String>,
    pub addressing: RowAddressing,
}

/// Declared type-name fragments that mark a column as text-like.
const TEXT_TYPE_MARKERS: [&str; 3] = ["char", "text", "blob"];

pub fn list_tables(exec: &mut dyn Executor) -> Result<Vec<String>, DbError> {
    let result = exec.query("SHOW TABLES")?;
    let mut tables = Vec::with_capacity(result.rows.len());
    for row in &result.rows {
        tables.push(text_cell(row, 0, "SHOW TABLES")?);
    }
    Ok(tables)
}

pub fn describe_table(exec: &mut dyn Executor, name: &str) -> Result<TableDescriptor, DbError> {
    let addressing = discover_addressing(exec, name)?;
    let result = exec.query(&format!("SHOW COLUMNS FROM {}", quote_ident(name)))?;
    let field_at = result.column_index("Field")?;
    let type_at = result.column_index("Type")?;
    let mut columns = Vec::with_capacity(result.rows.len());
    let mut text_columns = Vec::new();
    for row in &result.rows {
        let field = text_cell(row, field_at, "SHOW COLUMNS")?;
        let ty = text_cell(row, type_at, "SHOW COLUMNS")?.to_ascii_lowercase();
        if TEXT_TYPE_MARKERS.iter().any(|marker| ty.contains(marker)) {
            text_columns.push(field.clone());
        }
        columns.push(field);
    }
    Ok(TableDescriptor {
        name: name.to_string(),
        columns,
        text_columns,
        addressing,
    })
}

/// Primary key first, else the first unique index, else whole-row.
fn discover_addressing(exec: &mut dyn Executor, name: &str) -> Result<RowAddressing, DbError> {
    let quoted = quote_ident(name);

    let primary = exec.query(&format!(
        "SHOW KEYS FROM {quoted} WHERE Key_name = 'PRIMARY'"
    ))?;
    if !primary.rows.is_empty() {
        let col_at = primary.column_index("Column_name")?;
        let mut cols = Vec::with_capacity(primary.rows.len());
        for row in &primary.rows {
            cols.push(text_cell(row, col_at, "SHOW KEYS")?);
        }
        return Ok(RowAddressing::PrimaryKey(cols));
    }

    let unique = exec.query(&format!("SHOW INDEX FROM {quoted} WHERE Non_unique = 0"))?;
    if !unique.rows.is_empty() {
        let name_at = unique.column_index("Key_name")?;
        let col_at = unique.column_index("Column_name")?;
        let first = text_cell(&unique.rows[0], name_at, "SHOW INDEX")?;
        let mut cols = Vec::new();
        for row in &unique.rows {
            // rows arrive grouped by index; keep the first group only
            if text_cell(row, name_at, "SHOW INDEX")? != first {
                break;
            }
            cols.push(text_cell(row, col_at, "SHOW INDEX")?);
        }
        return Ok(RowAddressing::UniqueKey(cols));
    }

    Ok(RowAddressing::WholeRow)
}

fn text_cell(row: &Row, at: usize, source: &str) -> Result<String, DbError> {
    let bytes = row
        .get(at)
        .and_then(SqlValue::as_bytes)
        .ok_or_else(|| DbError::Metadata(source.to_string()))?;
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| DbError::Metadata(source.to_string()))
}
