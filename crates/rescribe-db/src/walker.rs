//! Table scan: read rows, rewrite text-like cells, emit parameterized
//! updates.

use tracing::{debug, info, warn};

use crate::error::DbError;
use crate::exec::{quote_ident, Executor, SqlValue};
use crate::report::{ScanReport, TableReport};
use crate::schema::{describe_table, list_tables, TableDescriptor};

/// Scan every table, rewriting `search` to `replace` in all text-like
/// columns.
///
/// Enumeration failure is fatal. Per-table metadata failures and per-row
/// update failures are recorded in the report and the scan continues.
pub fn scan_database(
    exec: &mut dyn Executor,
    search: &[u8],
    replace: &[u8],
) -> Result<ScanReport, DbError> {
    let tables = list_tables(exec)?;
    let mut report = ScanReport::default();
    for table in tables {
        match describe_table(exec, &table) {
            Ok(desc) => report.tables.push(scan_table(exec, &desc, search, replace)),
            Err(err) => {
                warn!(target: "rescribe.walker", table = %table, error = %err, "metadata discovery failed, table skipped");
                let mut skipped = TableReport::new(table, Vec::new());
                skipped.errors.push(format!("metadata discovery failed: {err}"));
                report.tables.push(skipped);
            }
        }
    }
    Ok(report)
}

/// Scan one described table. Never fails outright: select and update
/// problems land in the returned report.
pub fn scan_table(
    exec: &mut dyn Executor,
    desc: &TableDescriptor,
    search: &[u8],
    replace: &[u8],
) -> TableReport {
    let mut report = TableReport::new(desc.name.clone(), desc.text_columns.clone());
    if desc.text_columns.is_empty() {
        return report;
    }

    let key_columns: Vec<String> = desc
        .addressing
        .key_columns(&desc.columns)
        .iter()
        .filter(|c| desc.columns.contains(*c))
        .cloned()
        .collect();
    let projected = projection(&key_columns, &desc.text_columns, &desc.columns);
    info!(
        target: "rescribe.walker",
        table = %desc.name,
        columns = ?desc.text_columns,
        "scanning table"
    );

    let select = format!(
        "SELECT {} FROM {}",
        quoted_list(&projected),
        quote_ident(&desc.name)
    );
    debug!(target: "rescribe.walker", sql = %select);
    let result = match exec.query(&select) {
        Ok(result) => result,
        Err(err) => {
            report.errors.push(format!("select failed: {err}"));
            return report;
        }
    };

    let text_at: Vec<usize> = projected
        .iter()
        .enumerate()
        .filter(|(_, c)| desc.text_columns.contains(*c))
        .map(|(i, _)| i)
        .collect();
    let key_at: Vec<usize> = key_columns
        .iter()
        .filter_map(|c| projected.iter().position(|p| p == c))
        .collect();

    for row in &result.rows {
        report.rows_examined += 1;
        if row.len() != projected.len() {
            report.errors.push("malformed row in result set".to_string());
            continue;
        }

        let mut changed: Vec<(usize, Vec<u8>)> = Vec::new();
        for &at in &text_at {
            // null cells are skipped
            let Some(original) = row[at].as_bytes() else {
                continue;
            };
            let rewritten = rescribe_core::rewrite(original, search, replace);
            if rewritten != original {
                changed.push((at, rewritten));
            }
        }
        if changed.is_empty() {
            continue;
        }

        let assignments = changed
            .iter()
            .map(|(at, _)| format!("{} = ?", quote_ident(&projected[*at])))
            .collect::<Vec<_>>()
            .join(", ");
        // null-safe equality so null identifier cells match null
        let predicate = key_columns
            .iter()
            .map(|c| format!("{} <=> ?", quote_ident(c)))
            .collect::<Vec<_>>()
            .join(" AND ");
        let update = format!(
            "UPDATE {} SET {assignments} WHERE {predicate}",
            quote_ident(&desc.name)
        );

        let mut params: Vec<SqlValue> = changed
            .iter()
            .map(|(_, bytes)| SqlValue::Bytes(bytes.clone()))
            .collect();
        // identifier binds the values as read, not as rewritten
        params.extend(key_at.iter().map(|&at| row[at].clone()));

        debug!(target: "rescribe.walker", sql = %update);
        match exec.execute(&update, &params) {
            Ok(affected) => report.rows_updated += affected,
            Err(err) => {
                warn!(target: "rescribe.walker", table = %desc.name, error = %err, "row update failed");
                report.errors.push(format!("update failed: {err}"));
            }
        }
    }
    report
}

/// Union of key and text-like columns, in table order, deduplicated.
fn projection(keys: &[String], text: &[String], all: &[String]) -> Vec<String> {
    all.iter()
        .filter(|c| keys.contains(*c) || text.contains(*c))
        .cloned()
        .collect()
}

fn quoted_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ")
}
