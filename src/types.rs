//! Type definitions for tabular CSV data

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One line of a CSV file: fields in column order
pub type Row = Vec<String>;

/// Quote character and field delimiter of a CSV dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dialect {
    /// Character wrapping fields that contain special characters
    pub quote: char,
    /// Character separating fields
    pub delimiter: char,
}

impl Dialect {
    /// Create a dialect with custom quote character and delimiter
    pub fn new(quote: char, delimiter: char) -> Self {
        Dialect { quote, delimiter }
    }

    /// Set custom quote character (builder pattern)
    pub fn quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Set custom delimiter (builder pattern)
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for Dialect {
    /// `"` quoting and `,` delimiter
    fn default() -> Self {
        Dialect {
            quote: '"',
            delimiter: ',',
        }
    }
}

/// Ordered rows of string fields
///
/// Rows keep input order and may have different lengths. A table is produced
/// in one piece by a read and can be freely mutated afterwards.
///
/// # Examples
///
/// ```
/// use minicsv::Table;
///
/// let mut table = Table::from(vec![vec!["id", "name"], vec!["1", "Alice"]]);
/// let header = table.remove_header();
///
/// assert_eq!(header, Some(vec!["id".to_string(), "name".to_string()]));
/// assert_eq!(table.get(0, 1), Some("Alice"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Table { rows: Vec::new() }
    }

    /// All rows in order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable access to the rows
    pub fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    /// Consume the table and return its rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Append a row
    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Field at (row, column), if present
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }

    /// Length of the longest row (0 for an empty table)
    pub fn max_columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Remove and return the first row
    pub fn remove_header(&mut self) -> Option<Row> {
        if self.rows.is_empty() {
            None
        } else {
            Some(self.rows.remove(0))
        }
    }

    /// Iterate over rows
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl<S: Into<String>> From<Vec<Vec<S>>> for Table {
    fn from(rows: Vec<Vec<S>>) -> Self {
        rows.into_iter().collect()
    }
}

impl<R, S> FromIterator<R> for Table
where
    R: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
        let mut table = Table::new();
        for row in iter {
            table.push(row);
        }
        table
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
