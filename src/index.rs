//! Lookup maps keyed by one column of a table
//!
//! The `index_*` functions keep one row per key (the last one wins), the
//! `group_*` functions keep every row in table order. Maps borrow rows from
//! the table. Key iteration follows the order in which keys first appear.

use crate::error::{CsvError, KeyKind, Result};
use crate::types::{Row, Table};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// What to do when a numeric key cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyErrors {
    /// Stop and return [`CsvError::KeyParse`]
    #[default]
    Fail,
    /// Leave the row out of the map and carry on
    Skip,
}

impl KeyErrors {
    /// `Skip` when `ignore` is true, `Fail` otherwise
    pub fn ignore(ignore: bool) -> Self {
        if ignore {
            KeyErrors::Skip
        } else {
            KeyErrors::Fail
        }
    }
}

/// `f64` usable as a map key
///
/// Equality and hashing use the bit pattern: all NaNs are one key and
/// `-0.0` is a different key from `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(f64);

impl FloatKey {
    /// The wrapped value
    pub fn value(self) -> f64 {
        self.0
    }

    fn bits(self) -> u64 {
        if self.0.is_nan() {
            f64::NAN.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl From<f64> for FloatKey {
    fn from(value: f64) -> Self {
        FloatKey(value)
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl fmt::Display for FloatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One row per string key
pub type StringIndex<'a> = IndexMap<&'a str, &'a Row>;
/// All rows per string key
pub type StringGroups<'a> = IndexMap<&'a str, Vec<&'a Row>>;
/// One row per integer key
pub type IntIndex<'a> = IndexMap<i64, &'a Row>;
/// All rows per integer key
pub type IntGroups<'a> = IndexMap<i64, Vec<&'a Row>>;
/// All rows per floating-point key
pub type FloatGroups<'a> = IndexMap<FloatKey, Vec<&'a Row>>;

/// Map each value of `column` to the last row holding it
///
/// # Examples
///
/// ```
/// use minicsv::{index, Table};
///
/// let table = Table::from(vec![vec!["a", "1"], vec!["b", "2"], vec!["a", "3"]]);
/// let by_name = index::index_by_string(&table, 0).unwrap();
///
/// assert_eq!(by_name["a"][1], "3");
/// assert_eq!(by_name.len(), 2);
/// ```
pub fn index_by_string(table: &Table, column: usize) -> Result<StringIndex<'_>> {
    last_wins(keyed_rows(table, column, |s| Ok(s)))
}

/// Map each value of `column` to all rows holding it
pub fn group_by_string(table: &Table, column: usize) -> Result<StringGroups<'_>> {
    grouped(keyed_rows(table, column, |s| Ok(s)))
}

/// Map each integer in `column` to the last row holding it
///
/// Keys are signed 64-bit, so values beyond the 32-bit range such as
/// `"3000000000"` are accepted as keys rather than reported as parse errors.
/// Surrounding whitespace is not trimmed; a leading `+` is accepted.
pub fn index_by_int(table: &Table, column: usize, on_error: KeyErrors) -> Result<IntIndex<'_>> {
    last_wins(skipping(keyed_rows(table, column, parse_int), on_error))
}

/// Map each integer in `column` to all rows holding it
///
/// Keys are parsed as in [`index_by_int`].
pub fn group_by_int(table: &Table, column: usize, on_error: KeyErrors) -> Result<IntGroups<'_>> {
    grouped(skipping(keyed_rows(table, column, parse_int), on_error))
}

/// Map each number in `column` to all rows holding it
///
/// With [`KeyErrors::Skip`], `,` is read as a decimal point so `"2,5"`
/// becomes `2.5`.
pub fn group_by_float(
    table: &Table,
    column: usize,
    on_error: KeyErrors,
) -> Result<FloatGroups<'_>> {
    let parse = move |s: &str| parse_float(s, on_error == KeyErrors::Skip);
    grouped(skipping(keyed_rows(table, column, parse), on_error))
}

fn parse_int(value: &str) -> std::result::Result<i64, KeyKind> {
    value.parse().map_err(|_| KeyKind::Integer)
}

fn parse_float(value: &str, comma_decimal: bool) -> std::result::Result<FloatKey, KeyKind> {
    let value = if comma_decimal {
        Cow::Owned(value.replace(',', "."))
    } else {
        Cow::Borrowed(value)
    };
    value
        .trim()
        .parse::<f64>()
        .map(FloatKey)
        .map_err(|_| KeyKind::Float)
}

/// Outcome of extracting the key of one row
enum Keyed<'a, K> {
    Key(K, &'a Row),
    Unparsable(CsvError),
}

fn keyed_rows<'a, K, F>(
    table: &'a Table,
    column: usize,
    parse: F,
) -> impl Iterator<Item = Result<Keyed<'a, K>>> + 'a
where
    F: Fn(&'a str) -> std::result::Result<K, KeyKind> + 'a,
    K: 'a,
{
    table
        .iter()
        .enumerate()
        .map(move |(i, row)| -> Result<Keyed<'a, K>> {
            let value: &'a str =
                row.get(column)
                    .map(String::as_str)
                    .ok_or_else(|| CsvError::IndexOutOfRange {
                        row: i,
                        column,
                        len: row.len(),
                    })?;
            Ok(match parse(value) {
                Ok(key) => Keyed::Key(key, row),
                Err(kind) => Keyed::Unparsable(CsvError::KeyParse {
                    row: i,
                    column,
                    value: value.to_string(),
                    kind,
                }),
            })
        })
}

fn skipping<'a, K: 'a>(
    rows: impl Iterator<Item = Result<Keyed<'a, K>>> + 'a,
    on_error: KeyErrors,
) -> impl Iterator<Item = Result<Keyed<'a, K>>> + 'a {
    rows.filter(move |item| {
        !(on_error == KeyErrors::Skip && matches!(item, Ok(Keyed::Unparsable(_))))
    })
}

fn last_wins<'a, K: Hash + Eq>(
    rows: impl Iterator<Item = Result<Keyed<'a, K>>>,
) -> Result<IndexMap<K, &'a Row>> {
    let mut map = IndexMap::new();
    for item in rows {
        match item? {
            Keyed::Key(key, row) => {
                map.insert(key, row);
            }
            Keyed::Unparsable(err) => return Err(err),
        }
    }
    Ok(map)
}

fn grouped<'a, K: Hash + Eq>(
    rows: impl Iterator<Item = Result<Keyed<'a, K>>>,
) -> Result<IndexMap<K, Vec<&'a Row>>> {
    let mut map: IndexMap<K, Vec<&'a Row>> = IndexMap::new();
    for item in rows {
        match item? {
            Keyed::Key(key, row) => map.entry(key).or_default().push(row),
            Keyed::Unparsable(err) => return Err(err),
        }
    }
    Ok(map)
}
