//! CSV encoding of whole tables

use crate::types::{Dialect, Table};

/// CSV encoder for writing tables as delimited text
///
/// A field is quoted when it contains the delimiter, a space or a newline.
/// Quote characters are always doubled, quoted or not. Every row ends with
/// `\n` and is padded with delimiters up to the widest row of the table.
pub struct CsvEncoder {
    quote: char,
    delimiter: char,
}

impl CsvEncoder {
    /// Create a new encoder for the given dialect
    pub fn new(dialect: Dialect) -> Self {
        Self {
            quote: dialect.quote,
            delimiter: dialect.delimiter,
        }
    }

    /// Encode every row of `table` into `buffer`
    pub fn encode_table(&self, table: &Table, buffer: &mut String) {
        let columns = table.max_columns();
        for row in table {
            self.encode_row(row, columns, buffer);
        }
    }

    /// Encode one row padded to `columns` fields, including the trailing newline
    ///
    /// Rows longer than `columns` are written in full.
    pub fn encode_row<S: AsRef<str>>(&self, fields: &[S], columns: usize, buffer: &mut String) {
        let columns = columns.max(fields.len());
        for n in 0..columns {
            if let Some(field) = fields.get(n) {
                self.encode_field(field.as_ref(), buffer);
            }
            if n + 1 < columns {
                buffer.push(self.delimiter);
            }
        }
        buffer.push('\n');
    }

    fn encode_field(&self, field: &str, buffer: &mut String) {
        let quoted = self.needs_quoting(field);
        if quoted {
            buffer.push(self.quote);
        }
        for ch in field.chars() {
            if ch == self.quote {
                buffer.push(self.quote);
            }
            buffer.push(ch);
        }
        if quoted {
            buffer.push(self.quote);
        }
    }

    fn needs_quoting(&self, field: &str) -> bool {
        field
            .chars()
            .any(|c| c == self.delimiter || c == ' ' || c == '\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(rows: Vec<Vec<&str>>) -> String {
        let mut buffer = String::new();
        CsvEncoder::new(Dialect::default()).encode_table(&Table::from(rows), &mut buffer);
        buffer
    }

    #[test]
    fn test_simple_fields() {
        assert_eq!(encode(vec![vec!["a", "b", "c"]]), "a,b,c\n");
    }

    #[test]
    fn test_quoted_fields() {
        assert_eq!(encode(vec![vec!["a,b", "c"]]), "\"a,b\",c\n");
    }

    #[test]
    fn test_space_triggers_quoting() {
        assert_eq!(encode(vec![vec!["Line 1", "x"]]), "\"Line 1\",x\n");
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(
            encode(vec![vec![r#"Say "Hello""#, "world"]]),
            "\"Say \"\"Hello\"\"\",world\n"
        );
    }

    #[test]
    fn test_quote_alone_is_doubled_not_wrapped() {
        assert_eq!(encode(vec![vec![r#"a"b"#]]), "a\"\"b\n");
    }

    #[test]
    fn test_newlines() {
        assert_eq!(
            encode(vec![vec!["Line1\nLine2", "normal"]]),
            "\"Line1\nLine2\",normal\n"
        );
    }

    #[test]
    fn test_ragged_rows_padded() {
        assert_eq!(encode(vec![vec!["a", "b"], vec!["c"]]), "a,b\nc,\n");
        assert_eq!(encode(vec![vec!["a"], vec![], vec!["b", "c", "d"]]), "a,,\n,,\nb,c,d\n");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(encode(vec![]), "");
    }

    #[test]
    fn test_all_empty() {
        assert_eq!(encode(vec![vec!["", "", ""]]), ",,\n");
    }

    #[test]
    fn test_custom_dialect() {
        let encoder = CsvEncoder::new(Dialect::new('\'', ';'));
        let mut buffer = String::new();
        encoder.encode_row(&["a", "b;c", "it's"], 3, &mut buffer);
        assert_eq!(buffer, "a;'b;c';it''s\n");
    }

    #[test]
    fn test_row_longer_than_columns() {
        let encoder = CsvEncoder::new(Dialect::default());
        let mut buffer = String::new();
        encoder.encode_row(&["a", "b"], 1, &mut buffer);
        assert_eq!(buffer, "a,b\n");
    }
}
