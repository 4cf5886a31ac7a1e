//! Core domain types for the mock MovieLens dataset.
//!
//! Column names follow the recommendation library's defaults so generated
//! tables can be fed straight into code that expects a real MovieLens frame.

use serde::{Deserialize, Serialize};

// =============================================================================
// Column Names
// =============================================================================

pub const DEFAULT_USER_COL: &str = "userID";
pub const DEFAULT_ITEM_COL: &str = "itemID";
pub const DEFAULT_RATING_COL: &str = "rating";
pub const DEFAULT_TIMESTAMP_COL: &str = "timestamp";
pub const DEFAULT_TITLE_COL: &str = "title";
pub const DEFAULT_GENRE_COL: &str = "genre";

/// The canonical ordered header of a rating dataset.
///
/// Never reordered: prefix selection slices this array.
pub const DEFAULT_HEADER: [&str; 4] = [
    DEFAULT_USER_COL,
    DEFAULT_ITEM_COL,
    DEFAULT_RATING_COL,
    DEFAULT_TIMESTAMP_COL,
];

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = i64;

/// Unique identifier for an item (movie)
pub type ItemId = i64;

/// Unix timestamp in seconds
pub type Timestamp = i64;

// =============================================================================
// Genres
// =============================================================================

/// The 18 MovieLens genres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Children,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    FilmNoir,
    Horror,
    Musical,
    Mystery,
    Romance,
    SciFi,
    Thriller,
    War,
    Western,
}

impl Genre {
    pub const ALL: [Genre; 18] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Children,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Fantasy,
        Genre::FilmNoir,
        Genre::Horror,
        Genre::Musical,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    /// Spelling used in MovieLens `movies.dat`
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Children => "Children's",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::FilmNoir => "Film-Noir",
            Genre::Horror => "Horror",
            Genre::Musical => "Musical",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }

    /// Inverse of [`Genre::as_str`]
    pub fn parse(s: &str) -> Option<Genre> {
        Genre::ALL.iter().copied().find(|g| g.as_str() == s)
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
