//! CSV file reading

use crate::csv::CsvParser;
use crate::encoding::{self, TextDecoder};
use crate::error::{CsvError, Result};
use crate::types::{Dialect, Table};
use crate::DEFAULT_ENCODING;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 8 * 1024;

/// CSV file reader
///
/// Opens the file immediately and reads the whole table in one call. The
/// file handle is released when the reader is consumed or dropped.
///
/// # Examples
///
/// ```no_run
/// use minicsv::CsvReader;
///
/// let table = CsvReader::open("data.csv")
///     .unwrap()
///     .encoding("latin1")
///     .unwrap()
///     .delimiter(';')
///     .read_table()
///     .unwrap();
///
/// for row in &table {
///     println!("{:?}", row);
/// }
/// ```
pub struct CsvReader {
    source: BufReader<File>,
    path: String,

    // Configuration
    encoding: &'static Encoding,
    dialect: Dialect,
}

impl CsvReader {
    /// Open a CSV file with UTF-8 encoding and the default dialect
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.display().to_string();

        let file = File::open(path_ref).map_err(|e| CsvError::read(&path_str, e))?;

        Ok(CsvReader {
            source: BufReader::new(file),
            path: path_str,
            encoding: encoding_rs::UTF_8,
            dialect: Dialect::default(),
        })
    }

    /// Set the text encoding by label (builder pattern)
    pub fn encoding(mut self, label: &str) -> Result<Self> {
        self.encoding = encoding::resolve(label)?;
        Ok(self)
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

    /// Read the whole file
    pub fn read_table(self) -> Result<Table> {
        let table = parse_reader(self.source, self.encoding, self.dialect, &self.path)?;
        tracing::debug!(
            path = %self.path,
            encoding = self.encoding.name(),
            rows = table.len(),
            "read CSV table"
        );
        Ok(table)
    }
}

fn parse_reader<R: Read>(
    mut source: R,
    encoding: &'static Encoding,
    dialect: Dialect,
    label: &str,
) -> Result<Table> {
    let mut decoder = TextDecoder::new(encoding);
    let mut parser = CsvParser::new(dialect);
    let mut bytes = vec![0u8; CHUNK_SIZE];
    let mut text = String::with_capacity(CHUNK_SIZE);

    loop {
        let read = match source.read(&mut bytes) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CsvError::read(label, e)),
        };
        let last = read == 0;

        decoder.decode(&bytes[..read], last, &mut text);
        parser.feed_str(&text);
        text.clear();

        if last {
            return Ok(parser.finish());
        }
    }
}

/// Read a UTF-8 CSV file with `"` quoting and `,` delimiter
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    read_csv_with_encoding(path, DEFAULT_ENCODING)
}

/// Read a CSV file in the named encoding with `"` quoting and `,` delimiter
pub fn read_csv_with_encoding<P: AsRef<Path>>(path: P, encoding: &str) -> Result<Table> {
    let dialect = Dialect::default();
    read_csv_with(path, encoding, dialect.quote, dialect.delimiter)
}

/// Read a CSV file with explicit encoding, quote character and delimiter
///
/// A missing file is reported before an unknown encoding.
pub fn read_csv_with<P: AsRef<Path>>(
    path: P,
    encoding: &str,
    quote: char,
    delimiter: char,
) -> Result<Table> {
    CsvReader::open(path)?
        .encoding(encoding)?
        .dialect(Dialect::new(quote, delimiter))
        .read_table()
}

/// Read CSV from any byte source
pub fn read_from<R: Read>(source: R, encoding: &str, dialect: Dialect) -> Result<Table> {
    let encoding = encoding::resolve(encoding)?;
    parse_reader(source, encoding, dialect, "<stream>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_writer::CsvWriter;

    #[test]
    fn test_read_plain_csv() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| CsvError::read("tempdir", e))?;
        let path = dir.path().join("plain.csv");
        {
            let mut writer = CsvWriter::new(&path)?;
            writer.write_table(&Table::from(vec![
                vec!["Name", "Age", "City"],
                vec!["Alice", "30", "New York"],
            ]))?;
            writer.save()?;
        }

        let table = read_csv(&path)?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], vec!["Name", "Age", "City"]);
        assert_eq!(table.get(1, 2), Some("New York"));
        Ok(())
    }

    #[test]
    fn test_read_from_stream() -> Result<()> {
        let table = read_from(&b"a,b\r\nc\r\n"[..], "UTF-8", Dialect::default())?;
        assert_eq!(table.into_rows(), vec![vec!["a", "b"], vec!["c"]]);
        Ok(())
    }

    #[test]
    fn test_read_from_latin1_stream() -> Result<()> {
        let table = read_from(&b"caf\xe9;na\xefve\n"[..], "latin1", Dialect::default().delimiter(';'))?;
        assert_eq!(table.into_rows(), vec![vec!["café", "naïve"]]);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = read_csv("definitely/not/here.csv").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_file_reported_before_encoding() {
        let err = read_csv_with("definitely/not/here.csv", "bogus", '"', ',').unwrap_err();
        assert!(matches!(err, CsvError::Read { .. }));
    }

    #[test]
    fn test_unsupported_encoding() {
        let err = read_from(&b""[..], "bogus", Dialect::default()).unwrap_err();
        assert!(matches!(err, CsvError::UnsupportedEncoding(_)));
    }

    #[test]
    fn test_large_input_spans_chunks() -> Result<()> {
        let mut text = String::new();
        for i in 0..2000 {
            text.push_str(&format!("{},\"row {}\"\n", i, i));
        }
        let table = read_from(text.as_bytes(), "UTF-8", Dialect::default())?;
        assert_eq!(table.len(), 2000);
        assert_eq!(table.get(1999, 1), Some("row 1999"));
        Ok(())
    }
}
