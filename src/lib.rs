//! # minicsv
//!
//! Read and write CSV files as in-memory tables, and build lookup maps keyed
//! by one column.
//!
//! - Configurable quote character and delimiter (`"` and `,` by default)
//! - Quote escaping by doubling, CRLF normalized to LF on read
//! - Any WHATWG-labelled text encoding (`"UTF-8"`, `"latin1"`, ...)
//! - Ragged rows are kept on read and padded with delimiters on write
//!
//! Writing a table and reading it back with the same dialect yields the same
//! fields, as long as no field contains a carriage return and no row is
//! empty (an empty row comes back as one empty field).
//!
//! ## Example
//!
//! ```no_run
//! use minicsv::{index, read_csv, write_csv, KeyErrors, Table};
//!
//! let table = Table::from(vec![
//!     vec!["Line 1", "Example, 1", "1"],
//!     vec!["Line 2", "Example \"2,0\"", "2"],
//! ]);
//! write_csv(&table, "example1.csv").unwrap();
//!
//! let rows = read_csv("example1.csv").unwrap();
//! let by_id = index::index_by_int(&rows, 2, KeyErrors::Skip).unwrap();
//! assert_eq!(by_id[&2][1], "Example \"2,0\"");
//! ```

pub mod csv;
pub mod csv_reader;
pub mod csv_writer;
pub mod encoding;
pub mod error;
pub mod index;
pub mod types;

pub use csv_reader::{read_csv, read_csv_with, read_csv_with_encoding, read_from, CsvReader};
pub use csv_writer::{print, to_string, write_csv, write_csv_with_encoding, write_to, CsvWriter};
pub use error::{CsvError, KeyKind, Result};
pub use index::{FloatKey, KeyErrors};
pub use types::{Dialect, Row, Table};

/// Encoding used when none is given
pub const DEFAULT_ENCODING: &str = "UTF-8";
