//! CSV file writing

use crate::csv::CsvEncoder;
use crate::encoding::{self, TextEncoder};
use crate::error::{CsvError, Result};
use crate::types::{Dialect, Table};
use crate::DEFAULT_ENCODING;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// CSV file writer
///
/// Creates (or truncates) the file on construction. Call [`CsvWriter::save`]
/// to flush; dropping the writer closes the file but swallows flush errors.
///
/// # Examples
///
/// ```no_run
/// use minicsv::{CsvWriter, Table};
///
/// let table = Table::from(vec![vec!["Name", "City"], vec!["Alice", "New York"]]);
///
/// let mut writer = CsvWriter::new("output.csv").unwrap().delimiter(';');
/// writer.write_table(&table).unwrap();
/// writer.save().unwrap();
/// ```
pub struct CsvWriter {
    writer: BufWriter<File>,
    path: String,

    // State
    row_count: u64,

    // Configuration
    encoding: &'static Encoding,
    dialect: Dialect,
}

impl CsvWriter {
    /// Create a UTF-8 CSV file with the default dialect
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create(path.as_ref(), encoding_rs::UTF_8)
    }

    /// Create a CSV file in the named encoding with the default dialect
    ///
    /// The label is checked before the file is touched, so an unknown
    /// encoding leaves an existing file intact.
    pub fn with_encoding<P: AsRef<Path>>(path: P, label: &str) -> Result<Self> {
        let encoding = encoding::resolve(label)?;
        Self::create(path.as_ref(), encoding)
    }

    fn create(path: &Path, encoding: &'static Encoding) -> Result<Self> {
        let path_str = path.display().to_string();

        let file = File::create(path).map_err(|e| CsvError::write(&path_str, e))?;

        Ok(CsvWriter {
            writer: BufWriter::new(file),
            path: path_str,
            row_count: 0,
            encoding,
            dialect: Dialect::default(),
        })
    }

    /// Set custom delimiter (builder pattern)
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.dialect.delimiter = delimiter;
        self
    }

    /// Set custom quote character (builder pattern)
    pub fn quote_char(mut self, quote: char) -> Self {
        self.dialect.quote = quote;
        self
    }

    /// Set quote character and delimiter at once (builder pattern)
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Write all rows of `table`, padded to its widest row
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        encode_into(
            table,
            &mut self.writer,
            self.encoding,
            self.dialect,
            &self.path,
        )?;
        self.row_count += table.len() as u64;
        tracing::debug!(
            path = %self.path,
            encoding = self.encoding.name(),
            rows = table.len(),
            columns = table.max_columns(),
            "wrote CSV table"
        );
        Ok(())
    }

    /// Get the number of rows written
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Flush and close the file
    pub fn save(mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| CsvError::write(&self.path, e))
    }
}

fn encode_into<W: Write>(
    table: &Table,
    writer: &mut W,
    encoding: &'static Encoding,
    dialect: Dialect,
    label: &str,
) -> Result<()> {
    let encoder = CsvEncoder::new(dialect);
    let mut text_encoder = TextEncoder::new(encoding);
    let columns = table.max_columns();

    // Reused per row
    let mut text = String::with_capacity(256);
    let mut bytes = Vec::with_capacity(256);

    for row in table {
        text.clear();
        bytes.clear();
        encoder.encode_row(row, columns, &mut text);
        text_encoder.encode(&text, false, &mut bytes);
        writer
            .write_all(&bytes)
            .map_err(|e| CsvError::write(label, e))?;
    }

    // Flush stateful encoders
    bytes.clear();
    text_encoder.encode("", true, &mut bytes);
    writer
        .write_all(&bytes)
        .map_err(|e| CsvError::write(label, e))
}

/// Write `table` as UTF-8 with `"` quoting and `,` delimiter
pub fn write_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    write_csv_with_encoding(table, path, DEFAULT_ENCODING)
}

/// Write `table` in the named encoding with `"` quoting and `,` delimiter
///
/// The encoding is checked before the file is created.
pub fn write_csv_with_encoding<P: AsRef<Path>>(table: &Table, path: P, encoding: &str) -> Result<()> {
    let mut writer = CsvWriter::with_encoding(path, encoding)?;
    writer.write_table(table)?;
    writer.save()
}

/// Write `table` as UTF-8 to any byte sink
///
/// The sink is flushed but not closed.
pub fn write_to<W: Write>(table: &Table, mut writer: W, quote: char, delimiter: char) -> Result<()> {
    encode_into(
        table,
        &mut writer,
        encoding_rs::UTF_8,
        Dialect::new(quote, delimiter),
        "<stream>",
    )?;
    writer.flush().map_err(|e| CsvError::write("<stream>", e))
}

/// Encode `table` into a string
pub fn to_string(table: &Table, dialect: Dialect) -> String {
    let mut buffer = String::new();
    CsvEncoder::new(dialect).encode_table(table, &mut buffer);
    buffer
}

/// Print `table` to standard output with `"` quoting and `,` delimiter
pub fn print(table: &Table) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    encode_into(
        table,
        &mut out,
        encoding_rs::UTF_8,
        Dialect::default(),
        "<stdout>",
    )?;
    out.flush().map_err(|e| CsvError::write("<stdout>", e))
}
