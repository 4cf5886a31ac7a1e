//! Column descriptors and the column-selection policy.
//!
//! A request keeps either the whole default header or a positional prefix of
//! it, plus whichever optional columns (title, genre) it opts into. The
//! selection is resolved into a [`Schema`] before any value is generated.

use crate::error::{MockDataError, Result};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Physical type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Int,
    Float,
    Str,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Int => f.write_str("int"),
            ColumnType::Float => f.write_str("float"),
            ColumnType::Str => f.write_str("string"),
        }
    }
}

/// One of the six columns a mock MovieLens table can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MovieLensColumn {
    User,
    Item,
    Rating,
    Timestamp,
    Title,
    Genre,
}

impl MovieLensColumn {
    /// Every column, in header order
    pub const ALL: [MovieLensColumn; 6] = [
        MovieLensColumn::User,
        MovieLensColumn::Item,
        MovieLensColumn::Rating,
        MovieLensColumn::Timestamp,
        MovieLensColumn::Title,
        MovieLensColumn::Genre,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MovieLensColumn::User => DEFAULT_USER_COL,
            MovieLensColumn::Item => DEFAULT_ITEM_COL,
            MovieLensColumn::Rating => DEFAULT_RATING_COL,
            MovieLensColumn::Timestamp => DEFAULT_TIMESTAMP_COL,
            MovieLensColumn::Title => DEFAULT_TITLE_COL,
            MovieLensColumn::Genre => DEFAULT_GENRE_COL,
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            MovieLensColumn::User | MovieLensColumn::Item | MovieLensColumn::Timestamp => {
                ColumnType::Int
            }
            MovieLensColumn::Rating => ColumnType::Float,
            MovieLensColumn::Title | MovieLensColumn::Genre => ColumnType::Str,
        }
    }

    pub fn from_name(name: &str) -> Option<MovieLensColumn> {
        MovieLensColumn::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// A named, typed column as seen by a table consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub column_type: ColumnType,
}

impl Field {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

impl From<MovieLensColumn> for Field {
    fn from(column: MovieLensColumn) -> Self {
        Field::new(column.name(), column.column_type())
    }
}

/// Ordered list of columns of a generated table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<MovieLensColumn>,
}

impl Schema {
    /// All six columns
    pub fn full() -> Self {
        Self {
            columns: MovieLensColumn::ALL.to_vec(),
        }
    }

    pub fn columns(&self) -> &[MovieLensColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: MovieLensColumn) -> bool {
        self.columns.contains(&column)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Name-to-type mapping used to deserialize a staged file
    pub fn type_mapping(&self) -> Vec<(String, ColumnType)> {
        self.columns
            .iter()
            .map(|c| (c.name().to_string(), c.column_type()))
            .collect()
    }
}

/// Which part of [`DEFAULT_HEADER`] a request keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultColumns {
    /// The whole default header
    All,
    /// The first `n` columns of the default header
    FirstN(usize),
}

impl DefaultColumns {
    /// Validate a raw `keep_first_n_cols` value.
    ///
    /// Accepts `1..=DEFAULT_HEADER.len()`.
    pub fn first_n(n: i64) -> Result<Self> {
        let max = DEFAULT_HEADER.len();
        if n < 1 || n > max as i64 {
            return Err(MockDataError::invalid_argument("keep_first_n_cols", n, 1, max));
        }
        Ok(DefaultColumns::FirstN(n as usize))
    }

    fn count(&self) -> Result<usize> {
        match *self {
            DefaultColumns::All => Ok(DEFAULT_HEADER.len()),
            DefaultColumns::FirstN(n) if n >= 1 && n <= DEFAULT_HEADER.len() => Ok(n),
            DefaultColumns::FirstN(n) => Err(MockDataError::invalid_argument(
                "keep_first_n_cols",
                n,
                1,
                DEFAULT_HEADER.len(),
            )),
        }
    }
}

/// How the output columns of a request are chosen.
///
/// The prefix only cuts the default header; title and genre are governed by
/// their own flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSelection {
    pub default_columns: DefaultColumns,
    pub keep_title: bool,
    pub keep_genre: bool,
}

impl ColumnSelection {
    /// Resolve the selection into a concrete schema.
    pub fn resolve(&self) -> Result<Schema> {
        let n = self.default_columns.count()?;
        let mut schema = Schema {
            columns: MovieLensColumn::ALL[..n].to_vec(),
        };
        if self.keep_title {
            schema.columns.push(MovieLensColumn::Title);
        }
        if self.keep_genre {
            schema.columns.push(MovieLensColumn::Genre);
        }
        Ok(schema)
    }
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self {
            default_columns: DefaultColumns::All,
            keep_title: true,
            keep_genre: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_prefix_matches_default_header() {
        for (column, name) in MovieLensColumn::ALL.iter().zip(DEFAULT_HEADER) {
            assert_eq!(column.name(), name);
        }
    }

    fn prefix(n: usize, keep_title: bool, keep_genre: bool) -> ColumnSelection {
        ColumnSelection {
            default_columns: DefaultColumns::FirstN(n),
            keep_title,
            keep_genre,
        }
    }

    #[test]
    fn test_first_n_bounds() {
        assert!(DefaultColumns::first_n(1).is_ok());
        assert!(DefaultColumns::first_n(4).is_ok());
        for bad in [-1, 0, 5, 100] {
            let err = DefaultColumns::first_n(bad).unwrap_err();
            assert!(matches!(err, MockDataError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn test_first_n_resolves_prefix() {
        let schema = prefix(2, false, false).resolve().unwrap();
        assert_eq!(schema.names(), vec!["userID", "itemID"]);
    }

    #[test]
    fn test_prefix_keeps_flagged_optional_columns() {
        let schema = prefix(2, true, false).resolve().unwrap();
        assert_eq!(schema.names(), vec!["userID", "itemID", "title"]);

        let schema = prefix(1, true, true).resolve().unwrap();
        assert_eq!(schema.names(), vec!["userID", "title", "genre"]);
    }

    #[test]
    fn test_unchecked_first_n_is_rejected_on_resolve() {
        assert!(prefix(0, true, true).resolve().is_err());
        assert!(prefix(5, true, true).resolve().is_err());
    }

    #[test]
    fn test_flags_drop_optional_columns() {
        let schema = ColumnSelection {
            keep_title: false,
            ..ColumnSelection::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(
            schema.names(),
            vec!["userID", "itemID", "rating", "timestamp", "genre"]
        );

        let schema = ColumnSelection {
            default_columns: DefaultColumns::All,
            keep_title: false,
            keep_genre: false,
        }
        .resolve()
        .unwrap();
        assert_eq!(schema.names(), DEFAULT_HEADER.to_vec());
    }

    #[test]
    fn test_type_mapping() {
        let mapping = Schema::full().type_mapping();
        assert_eq!(mapping[2], ("rating".to_string(), ColumnType::Float));
        assert_eq!(mapping[5], ("genre".to_string(), ColumnType::Str));
    }
}
