use thiserror::Error;

/// Decode failure. At the dispatcher every variant means the same thing:
/// the input is not a pure serialized payload and the next strategy runs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    #[error("input does not look like a serialized value")]
    NotSerialized,
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(usize),
    #[error("unexpected byte at offset {0}")]
    InvalidByte(usize),
    #[error("non-canonical number at offset {0}")]
    InvalidNumber(usize),
    #[error("declared length overruns input at offset {0}")]
    LengthOverrun(usize),
    #[error("closure values are not supported")]
    Closure,
    #[error("value nesting too deep")]
    TooDeep,
    #[error("trailing bytes after top-level value")]
    TrailingBytes,
}
