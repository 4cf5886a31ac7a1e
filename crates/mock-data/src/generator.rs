//! Mock MovieLens table generation.
//!
//! [`MockMovielens`] turns a [`GenerationRequest`] into a [`Table`]:
//!
//! 1. Resolve the request's column selection (fails fast on a bad
//!    `keep_first_n_cols`)
//! 2. Draw `size` values for each selected column, column by column, from a
//!    [`RandomStream`]
//! 3. Assemble the columns in header order

use crate::error::{MockDataError, Result};
use crate::random::{RandomStream, SeededStream};
use crate::schema::{ColumnSelection, DefaultColumns, Field, MovieLensColumn, Schema};
use crate::table::{ColumnData, Table};
use crate::types::{Genre, ItemId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Seed used when a request does not set one
pub const DEFAULT_SEED: i64 = 100;

/// Row count used when a request does not set one
pub const DEFAULT_SIZE: usize = 3;

const TITLE_ADJECTIVES: &[&str] = &[
    "Silent", "Crimson", "Last", "Lost", "Golden", "Broken", "Wild", "Hidden", "Midnight",
    "Electric", "Little", "Dark", "Eternal", "Frozen", "Secret", "Distant",
];

const TITLE_NOUNS: &[&str] = &[
    "River", "Empire", "Garden", "Horizon", "Stranger", "Kingdom", "Summer", "Station", "Mirror",
    "Harbor", "Voyage", "Detective", "Circus", "Frontier", "Orchard", "Signal",
];

/// Value domains for generated columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub min_user_id: UserId,
    pub max_user_id: UserId,
    pub min_item_id: ItemId,
    pub max_item_id: ItemId,
    pub min_rating: f64,
    pub max_rating: f64,
    pub min_timestamp: Timestamp,
    pub max_timestamp: Timestamp,
    pub min_year: i64,
    pub max_year: i64,
    /// Upper bound on genres per row (at least one is always drawn)
    pub max_genres: usize,
}

impl Default for GeneratorConfig {
    /// Ranges of the MovieLens 1M dataset
    fn default() -> Self {
        Self {
            min_user_id: 1,
            max_user_id: 6040,
            min_item_id: 1,
            max_item_id: 3952,
            min_rating: 1.0,
            max_rating: 5.0,
            min_timestamp: 956_703_932,
            max_timestamp: 1_046_454_590,
            min_year: 1919,
            max_year: 2000,
            max_genres: 3,
        }
    }
}

impl GeneratorConfig {
    /// Read a JSON config; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Check every range is non-empty and samplable
    pub fn validate(&self) -> Result<()> {
        fn check<T: PartialOrd + ToString>(param: &str, min: T, max: T) -> Result<()> {
            if min > max {
                return Err(MockDataError::invalid_argument(
                    param,
                    format!("{} > {}", min.to_string(), max.to_string()),
                    min,
                    max,
                ));
            }
            Ok(())
        }

        check("user_id", self.min_user_id, self.max_user_id)?;
        check("item_id", self.min_item_id, self.max_item_id)?;
        // Float sampling needs finite bounds and a finite width
        if !(self.max_rating - self.min_rating).is_finite() {
            return Err(MockDataError::invalid_argument(
                "rating",
                format!("[{}, {}]", self.min_rating, self.max_rating),
                "finite",
                "finite with a finite width",
            ));
        }
        check("rating", self.min_rating, self.max_rating)?;
        check("timestamp", self.min_timestamp, self.max_timestamp)?;
        check("year", self.min_year, self.max_year)?;
        if self.max_genres == 0 || self.max_genres > Genre::ALL.len() {
            return Err(MockDataError::invalid_argument(
                "max_genres",
                self.max_genres,
                1,
                Genre::ALL.len(),
            ));
        }
        Ok(())
    }
}

/// Parameters of one generation call
///
/// Built with method chaining:
/// ```ignore
/// let request = GenerationRequest::new(10).with_seed(-1).keep_first_n_cols(2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    pub size: usize,
    pub seed: i64,
    /// Raw, unvalidated prefix length; validated by [`GenerationRequest::selection`]
    pub keep_first_n_cols: Option<i64>,
    pub keep_title_col: bool,
    pub keep_genre_col: bool,
}

impl GenerationRequest {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn keep_first_n_cols(mut self, n: i64) -> Self {
        self.keep_first_n_cols = Some(n);
        self
    }

    pub fn keep_title_col(mut self, keep: bool) -> Self {
        self.keep_title_col = keep;
        self
    }

    pub fn keep_genre_col(mut self, keep: bool) -> Self {
        self.keep_genre_col = keep;
        self
    }

    /// Column-selection policy of this request.
    ///
    /// `keep_first_n_cols` only trims the default header; the title/genre
    /// flags apply either way.
    pub fn selection(&self) -> Result<ColumnSelection> {
        let default_columns = match self.keep_first_n_cols {
            Some(n) => DefaultColumns::first_n(n)?,
            None => DefaultColumns::All,
        };
        Ok(ColumnSelection {
            default_columns,
            keep_title: self.keep_title_col,
            keep_genre: self.keep_genre_col,
        })
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: DEFAULT_SEED,
            keep_first_n_cols: None,
            keep_title_col: true,
            keep_genre_col: true,
        }
    }
}

/// Generator of mock MovieLens tables
#[derive(Debug, Clone, Default)]
pub struct MockMovielens {
    config: GeneratorConfig,
}

impl MockMovielens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator with custom value domains
    pub fn with_config(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Table with the full header (default columns plus title and genre)
    pub fn example(&self, size: usize) -> Result<Table> {
        self.get_df(&GenerationRequest::new(size))
    }

    /// Generate a local table, seeding the stream from `request.seed`.
    pub fn get_df(&self, request: &GenerationRequest) -> Result<Table> {
        let mut stream = SeededStream::new(request.seed);
        self.get_df_with(request, &mut stream)
    }

    /// Generate a local table drawing values from `stream`.
    #[instrument(skip(self, stream), fields(size = request.size, seed = request.seed))]
    pub fn get_df_with(
        &self,
        request: &GenerationRequest,
        stream: &mut dyn RandomStream,
    ) -> Result<Table> {
        let schema = request.selection()?.resolve()?;
        debug!("Generating columns {:?}", schema.names());

        let table = self.generate(&schema, request.size, stream)?;
        debug!(
            "Generated {} rows x {} columns",
            table.num_rows(),
            table.num_columns()
        );
        Ok(table)
    }

    fn generate(
        &self,
        schema: &Schema,
        size: usize,
        stream: &mut dyn RandomStream,
    ) -> Result<Table> {
        let fields: Vec<Field> = schema.columns().iter().map(|c| Field::from(*c)).collect();
        let columns = schema
            .columns()
            .iter()
            .map(|column| self.generate_column(*column, size, stream))
            .collect();
        Table::new(fields, columns)
    }

    fn generate_column(
        &self,
        column: MovieLensColumn,
        size: usize,
        stream: &mut dyn RandomStream,
    ) -> ColumnData {
        let cfg = &self.config;
        match column {
            MovieLensColumn::User => ColumnData::Int(
                (0..size)
                    .map(|_| stream.int_in(cfg.min_user_id, cfg.max_user_id))
                    .collect(),
            ),
            MovieLensColumn::Item => ColumnData::Int(
                (0..size)
                    .map(|_| stream.int_in(cfg.min_item_id, cfg.max_item_id))
                    .collect(),
            ),
            MovieLensColumn::Rating => ColumnData::Float(
                (0..size)
                    .map(|_| stream.float_in(cfg.min_rating, cfg.max_rating))
                    .collect(),
            ),
            MovieLensColumn::Timestamp => ColumnData::Int(
                (0..size)
                    .map(|_| stream.int_in(cfg.min_timestamp, cfg.max_timestamp))
                    .collect(),
            ),
            MovieLensColumn::Title => {
                ColumnData::Str((0..size).map(|_| self.title(stream)).collect())
            }
            MovieLensColumn::Genre => {
                ColumnData::Str((0..size).map(|_| self.genres(stream)).collect())
            }
        }
    }

    /// e.g. "Silent Harbor (1987)"
    fn title(&self, stream: &mut dyn RandomStream) -> String {
        let adjective = TITLE_ADJECTIVES[stream.index(TITLE_ADJECTIVES.len())];
        let noun = TITLE_NOUNS[stream.index(TITLE_NOUNS.len())];
        let year = stream.int_in(self.config.min_year, self.config.max_year);
        format!("{} {} ({})", adjective, noun, year)
    }

    /// Distinct genres in canonical order, pipe-separated, e.g. "Comedy|Drama"
    fn genres(&self, stream: &mut dyn RandomStream) -> String {
        let count = stream.int_in(1, self.config.max_genres as i64) as usize;
        let mut picked: Vec<usize> = Vec::with_capacity(count);
        while picked.len() < count {
            let idx = stream.index(Genre::ALL.len());
            if !picked.contains(&idx) {
                picked.push(idx);
            }
        }
        picked.sort_unstable();
        picked
            .iter()
            .map(|&idx| Genre::ALL[idx].as_str())
            .collect::<Vec<_>>()
            .join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    /// Stream that always returns the lower bound
    struct LowStream;

    impl RandomStream for LowStream {
        fn int_in(&mut self, low: i64, _high: i64) -> i64 {
            low
        }

        fn float_in(&mut self, low: f64, _high: f64) -> f64 {
            low
        }
    }

    /// Stream that cycles through indices so genre picks stay distinct
    struct CountingStream(i64);

    impl RandomStream for CountingStream {
        fn int_in(&mut self, low: i64, high: i64) -> i64 {
            self.0 += 1;
            low + self.0 % (high - low + 1)
        }

        fn float_in(&mut self, low: f64, _high: f64) -> f64 {
            low
        }
    }

    #[test]
    fn test_injected_stream_drives_values() {
        let generator = MockMovielens::new();
        let table = generator
            .get_df_with(&GenerationRequest::new(2), &mut LowStream)
            .unwrap();

        assert_eq!(
            table.column(DEFAULT_USER_COL),
            Some(&ColumnData::Int(vec![1, 1]))
        );
        assert_eq!(
            table.column(DEFAULT_RATING_COL),
            Some(&ColumnData::Float(vec![1.0, 1.0]))
        );
        assert_eq!(
            table.column(DEFAULT_TITLE_COL),
            Some(&ColumnData::Str(vec![
                "Silent River (1919)".to_string(),
                "Silent River (1919)".to_string()
            ]))
        );
        assert_eq!(
            table.column(DEFAULT_GENRE_COL),
            Some(&ColumnData::Str(vec!["Action".to_string(), "Action".to_string()]))
        );
    }

    #[test]
    fn test_genres_are_distinct_and_sorted() {
        let generator = MockMovielens::new();
        let mut stream = CountingStream(0);
        for _ in 0..20 {
            let genres = generator.genres(&mut stream);
            let parsed: Vec<Genre> = genres.split('|').map(|g| Genre::parse(g).unwrap()).collect();
            let mut dedup = parsed.clone();
            dedup.dedup();
            assert_eq!(parsed, dedup);
            assert!(!parsed.is_empty() && parsed.len() <= 3);
        }
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new(10)
            .with_seed(-1)
            .keep_first_n_cols(2)
            .keep_title_col(false);
        assert_eq!(request.size, 10);
        assert_eq!(request.seed, -1);
        assert_eq!(request.keep_first_n_cols, Some(2));
        assert!(!request.keep_title_col);
        assert!(request.keep_genre_col);
        assert_eq!(
            request.selection().unwrap(),
            ColumnSelection {
                default_columns: DefaultColumns::FirstN(2),
                keep_title: false,
                keep_genre: true,
            }
        );
    }

    #[test]
    fn test_invalid_prefix_fails_before_drawing() {
        struct PanicStream;
        impl RandomStream for PanicStream {
            fn int_in(&mut self, _: i64, _: i64) -> i64 {
                panic!("stream must not be touched")
            }
            fn float_in(&mut self, _: f64, _: f64) -> f64 {
                panic!("stream must not be touched")
            }
        }

        let request = GenerationRequest::new(10).keep_first_n_cols(100);
        let err = MockMovielens::new()
            .get_df_with(&request, &mut PanicStream)
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid value"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = GeneratorConfig::default();
        config.min_rating = 6.0;
        assert!(MockMovielens::with_config(config).is_err());

        let mut config = GeneratorConfig::default();
        config.max_genres = 0;
        assert!(MockMovielens::with_config(config).is_err());

        let mut config = GeneratorConfig::default();
        config.max_user_id = 10;
        assert!(MockMovielens::with_config(config).is_ok());
    }

    #[test]
    fn test_rating_bounds_must_be_finite() {
        let bounds = [
            (-1.7e308, 1.7e308),
            (f64::NAN, 5.0),
            (1.0, f64::INFINITY),
            (f64::NEG_INFINITY, f64::INFINITY),
        ];
        for (min_rating, max_rating) in bounds {
            let config = GeneratorConfig {
                min_rating,
                max_rating,
                ..GeneratorConfig::default()
            };
            let err = MockMovielens::with_config(config).unwrap_err();
            match err {
                MockDataError::InvalidArgument { param, .. } => assert_eq!(param, "rating"),
                other => panic!("unexpected error: {other}"),
            }
        }

        let config = GeneratorConfig {
            min_rating: -1.0e307,
            max_rating: 1.0e307,
            ..GeneratorConfig::default()
        };
        let generator = MockMovielens::with_config(config).unwrap();
        assert_eq!(generator.get_df(&GenerationRequest::new(5)).unwrap().num_rows(), 5);
    }

    #[test]
    fn test_config_from_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen.json");
        std::fs::write(&path, r#"{ "max_user_id": 10, "max_genres": 1 }"#).unwrap();

        let config = GeneratorConfig::from_json_file(&path).unwrap();
        assert_eq!(config.max_user_id, 10);
        assert_eq!(config.max_genres, 1);
        assert_eq!(config.max_item_id, GeneratorConfig::default().max_item_id);
    }
}
