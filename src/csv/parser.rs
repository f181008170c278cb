//! Character-driven CSV parsing
//!
//! Quotes are special anywhere in a field, not only at its start: every quote
//! character toggles between the quoted and unquoted state. A quote directly
//! following another quote also emits one literal quote, so `""` decodes to
//! `"` both inside and outside a quoted region.

use crate::types::{Dialect, Row, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Delimiters and newlines end fields and rows
    Unquoted,
    /// Everything except the quote character is literal
    Quoted,
}

impl State {
    fn toggled(self) -> Self {
        match self {
            State::Unquoted => State::Quoted,
            State::Quoted => State::Unquoted,
        }
    }
}

/// CSV parser building a [`Table`] from a stream of characters
///
/// Feed it text in arbitrary chunks, then call [`CsvParser::finish`].
///
/// # Examples
///
/// ```
/// use minicsv::csv::CsvParser;
/// use minicsv::Dialect;
///
/// let mut parser = CsvParser::new(Dialect::default());
/// parser.feed_str("name,note\r\n");
/// parser.feed_str("Alice,\"likes \"\"tea\"\", a lot\"\n");
/// let table = parser.finish();
///
/// assert_eq!(table.get(0, 1), Some("note"));
/// assert_eq!(table.get(1, 1), Some("likes \"tea\", a lot"));
/// ```
pub struct CsvParser {
    quote: char,
    delimiter: char,
    state: State,
    // None right after a doubled quote, so a third quote is not paired again
    previous: Option<char>,
    field: String,
    row: Row,
    table: Table,
}

impl CsvParser {
    /// Create a new parser for the given dialect
    pub fn new(dialect: Dialect) -> Self {
        Self {
            quote: dialect.quote,
            delimiter: dialect.delimiter,
            state: State::Unquoted,
            previous: None,
            field: String::new(),
            row: Vec::new(),
            table: Table::new(),
        }
    }

    /// Consume one character
    pub fn feed(&mut self, ch: char) {
        let previous = self.previous.replace(ch);

        if ch == self.quote {
            if previous == Some(self.quote) {
                self.field.push(ch);
                self.previous = None;
            }
            self.state = self.state.toggled();
            return;
        }

        match self.state {
            State::Quoted => self.field.push(ch),
            State::Unquoted => {
                if ch == self.delimiter {
                    self.end_field();
                } else if ch == '\n' {
                    self.end_field();
                    self.end_row();
                } else if ch != '\r' {
                    self.field.push(ch);
                }
            }
        }
    }

    /// Consume a chunk of text
    pub fn feed_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.feed(ch);
        }
    }

    /// Flush pending input and return the parsed table
    ///
    /// A non-empty pending field becomes the last field, and a row with at
    /// least one field becomes the last row. A trailing newline therefore
    /// never produces an extra empty row.
    pub fn finish(mut self) -> Table {
        if !self.field.is_empty() {
            self.end_field();
        }
        if !self.row.is_empty() {
            self.end_row();
        }
        self.table
    }

    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
    }

    fn end_row(&mut self) {
        let row = std::mem::take(&mut self.row);
        self.table.rows_mut().push(row);
    }
}

/// Parse a complete string
pub fn parse_str(text: &str, dialect: Dialect) -> Table {
    let mut parser = CsvParser::new(dialect);
    parser.feed_str(text);
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Vec<String>> {
        parse_str(text, Dialect::default()).into_rows()
    }

    #[test]
    fn test_simple() {
        assert_eq!(parse("a,b,c\n1,2,3\n"), vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_no_trailing_newline() {
        assert_eq!(parse("a,b\nc,d"), vec![vec!["a", "b"], vec!["c", "d"]]);
        assert_eq!(parse("a,b\nc,d\n"), parse("a,b\nc,d"));
    }

    #[test]
    fn test_crlf() {
        assert_eq!(parse("a,b\r\n"), vec![vec!["a", "b"]]);
        assert_eq!(parse("a,b\r\n"), parse("a,b\n"));
    }

    #[test]
    fn test_quoted() {
        assert_eq!(parse("\"a,b\",c\n"), vec![vec!["a,b", "c"]]);
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(
            parse(r#""Say ""Hello""",world"#),
            vec![vec![r#"Say "Hello""#, "world"]]
        );
    }

    #[test]
    fn test_quoted_with_newline() {
        assert_eq!(
            parse("\"Line 1\nLine 2\",normal\n"),
            vec![vec!["Line 1\nLine 2", "normal"]]
        );
    }

    #[test]
    fn test_carriage_return_kept_inside_quotes() {
        assert_eq!(parse("\"a\r\nb\"\r\n"), vec![vec!["a\r\nb"]]);
    }

    #[test]
    fn test_ragged_rows() {
        assert_eq!(parse("a,b\nc\n"), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(parse("a,,c\n,,\n"), vec![vec!["a", "", "c"], vec!["", "", ""]]);
    }

    #[test]
    fn test_blank_line_is_single_empty_field() {
        assert_eq!(parse("a\n\nb\n"), vec![vec!["a"], vec![""], vec!["b"]]);
    }

    #[test]
    fn test_trailing_empty_field_at_eof_dropped() {
        // Pending empty buffer at end of input is not a field
        assert_eq!(parse("a,"), vec![vec!["a"]]);
        assert_eq!(parse("a,\n"), vec![vec!["a", ""]]);
    }

    #[test]
    fn test_quote_mid_field_toggles() {
        assert_eq!(parse("ab\"c,d\"e\n"), vec![vec!["abc,de"]]);
    }

    #[test]
    fn test_unquoted_doubled_quote() {
        assert_eq!(parse("a\"\"b,c\n"), vec![vec!["a\"b", "c"]]);
        assert_eq!(parse("a,\"\",c\n"), vec![vec!["a", "\"", "c"]]);
    }

    #[test]
    fn test_triple_quote() {
        // doubled quote, then the third opens a quoted region
        assert_eq!(parse("\"\"\"x,y\"\n"), vec![vec!["\"x,y"]]);
    }

    #[test]
    fn test_chunked_feed_matches_whole() {
        let text = "id,\"na,me\"\r\n1,\"O\"\"Neil\"\n";
        let mut parser = CsvParser::new(Dialect::default());
        for chunk in ["id,\"na", ",me\"\r", "\n1,\"O\"", "\"Neil\"\n"] {
            parser.feed_str(chunk);
        }
        assert_eq!(parser.finish(), parse_str(text, Dialect::default()));
    }

    #[test]
    fn test_custom_dialect() {
        let table = parse_str("a;'b;c';'it''s'\n", Dialect::new('\'', ';'));
        assert_eq!(table.into_rows(), vec![vec!["a", "b;c", "it's"]]);
    }

    #[test]
    fn test_tab_delimiter() {
        let table = parse_str("a b\tc\n", Dialect::default().delimiter('\t'));
        assert_eq!(table.into_rows(), vec![vec!["a b", "c"]]);
    }
}
