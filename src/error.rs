//! Error types for CSV reading, writing and indexing

use std::fmt;
use std::io;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CsvError>;

/// Numeric type a key column was being parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Signed 64-bit integer
    Integer,
    /// 64-bit floating point
    Float,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Integer => f.write_str("integer"),
            KeyKind::Float => f.write_str("float"),
        }
    }
}

/// Errors produced by this crate
///
/// Nothing is recovered internally: a failed read returns no rows, a failed
/// write may leave a partially written destination.
#[derive(Error, Debug)]
pub enum CsvError {
    /// The source could not be opened or read
    #[error("Failed to read CSV from '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The destination could not be created or written
    #[error("Failed to write CSV to '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Encoding label not known
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// A row is too short to contain the key column
    #[error("Row {row} has {len} column(s), key column {column} is out of range")]
    IndexOutOfRange {
        row: usize,
        column: usize,
        len: usize,
    },

    /// A key column value is not a valid number
    #[error("Row {row}, column {column}: cannot parse {value:?} as {kind}")]
    KeyParse {
        row: usize,
        column: usize,
        value: String,
        kind: KeyKind,
    },
}

impl CsvError {
    /// True when the underlying I/O failure was a missing file
    pub fn is_not_found(&self) -> bool {
        match self {
            CsvError::Read { source, .. } | CsvError::Write { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    pub(crate) fn read(path: impl Into<String>, source: io::Error) -> Self {
        CsvError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<String>, source: io::Error) -> Self {
        CsvError::Write {
            path: path.into(),
            source,
        }
    }
}
