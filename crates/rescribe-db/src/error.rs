use thiserror::Error;

/// Database-side failure.
///
/// Rewriter-internal parse failures never surface here — they are ordinary
/// control flow inside `rescribe-core`. What remains is the driver itself
/// failing, or metadata result sets that do not have the shape the walker
/// relies on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DbError {
    #[error("database error: {0}")]
    Backend(String),
    #[error("result set is missing column `{0}`")]
    MissingColumn(String),
    #[error("malformed row from {0}")]
    Metadata(String),
}
