//! Table/row walker around the payload rewriter.
//!
//! Enumerates tables, classifies columns, reads rows, rewrites text-like
//! cells through `rescribe-core`, and emits one parameterized `UPDATE` per
//! modified row, addressed by primary key, first unique key, or — when a
//! table has neither — the whole row under null-safe equality.
//!
//! Connection establishment stays outside this crate: everything talks to
//! the database through the [`Executor`] trait, and results come back as a
//! structured [`ScanReport`] whose `Display` impl renders the progress,
//! summary and error lines.

pub mod error;
pub mod exec;
pub mod report;
pub mod schema;
pub mod walker;

pub use error::DbError;
pub use exec::{quote_ident, Executor, ResultSet, Row, SqlValue};
pub use report::{ScanReport, TableReport};
pub use schema::{describe_table, list_tables, RowAddressing, TableDescriptor};
pub use walker::{scan_database, scan_table};
