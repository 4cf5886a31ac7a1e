//! Producing mock tables inside a distributed session.
//!
//! The local table is generated first, staged as CSV, then loaded by the
//! session with the generated table's own column-type mapping.

use crate::error::Result;
use crate::generator::{DEFAULT_SEED, DEFAULT_SIZE, GenerationRequest, MockMovielens};
use crate::schema::Field;
use crate::session::TableLoader;
use crate::staging::StagingArea;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Parameters of a distributed generation call.
///
/// Unlike [`GenerationRequest`] there is no prefix selection; only the
/// optional title and genre columns can be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributedRequest {
    pub size: usize,
    pub seed: i64,
    pub keep_title_col: bool,
    pub keep_genre_col: bool,
    /// Directory that keeps the staging file; a temporary one when `None`
    pub staging_dir: Option<PathBuf>,
}

impl DistributedRequest {
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

    pub fn keep_title_col(mut self, keep: bool) -> Self {
        self.keep_title_col = keep;
        self
    }

    pub fn keep_genre_col(mut self, keep: bool) -> Self {
        self.keep_genre_col = keep;
        self
    }

    pub fn staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    fn local_request(&self) -> GenerationRequest {
        GenerationRequest::new(self.size)
            .with_seed(self.seed)
            .keep_title_col(self.keep_title_col)
            .keep_genre_col(self.keep_genre_col)
    }
}

impl Default for DistributedRequest {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: DEFAULT_SEED,
            keep_title_col: true,
            keep_genre_col: true,
            staging_dir: None,
        }
    }
}

impl MockMovielens {
    /// Generate a table and load it through `session`.
    ///
    /// Writes `mock_movielens_<size>.csv` into the staging directory. A
    /// caller-supplied directory keeps the file; a temporary one is removed
    /// once the session has loaded it. An unavailable session fails before
    /// anything is generated or written.
    #[instrument(skip(self, session, request), fields(size = request.size, seed = request.seed))]
    pub fn get_distributed_df<L: TableLoader>(
        &self,
        session: &L,
        request: &DistributedRequest,
    ) -> Result<L::Table> {
        // Nothing is staged for a session that would refuse the load
        session.ensure_available()?;

        let table = self.get_df(&request.local_request())?;
        let types: Vec<_> = table
            .fields()
            .iter()
            .map(|Field { name, column_type }| (name.clone(), *column_type))
            .collect();

        let staging = StagingArea::new(request.staging_dir.as_deref())?;
        let path = staging.stage(&table)?;
        info!("Staged {} rows at {}", table.num_rows(), path.display());

        session.load_csv(&path, &types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MockDataError;
    use crate::schema::ColumnType;
    use crate::session::DistributedTable;
    use crate::types::*;
    use std::cell::RefCell;
    use std::path::Path;

    /// Loader that records what it was asked to load
    #[derive(Default)]
    struct RecordingLoader {
        calls: RefCell<Vec<(PathBuf, Vec<(String, ColumnType)>, bool)>>,
        unavailable: bool,
    }

    #[derive(Debug)]
    struct Loaded {
        rows: usize,
        fields: Vec<Field>,
    }

    impl DistributedTable for Loaded {
        fn count(&self) -> usize {
            self.rows
        }

        fn schema(&self) -> &[Field] {
            &self.fields
        }
    }

    impl TableLoader for RecordingLoader {
        type Table = Loaded;

        fn ensure_available(&self) -> Result<()> {
            if self.unavailable {
                Err(MockDataError::SessionUnavailable("recording loader".into()))
            } else {
                Ok(())
            }
        }

        fn load_csv(&self, path: &Path, types: &[(String, ColumnType)]) -> Result<Loaded> {
            let text = std::fs::read_to_string(path)?;
            let rows = text.lines().count() - 1;
            self.calls
                .borrow_mut()
                .push((path.to_path_buf(), types.to_vec(), path.exists()));
            Ok(Loaded {
                rows,
                fields: types
                    .iter()
                    .map(|(n, t)| Field::new(n.clone(), *t))
                    .collect(),
            })
        }
    }

    #[test]
    fn test_mapping_follows_generated_columns() {
        let loader = RecordingLoader::default();
        let request = DistributedRequest::new(4).keep_genre_col(false);

        let table = MockMovielens::new()
            .get_distributed_df(&loader, &request)
            .unwrap();

        assert_eq!(table.count(), 4);
        let calls = loader.calls.borrow();
        assert_eq!(calls.len(), 1);
        let names: Vec<&str> = calls[0].1.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                DEFAULT_USER_COL,
                DEFAULT_ITEM_COL,
                DEFAULT_RATING_COL,
                DEFAULT_TIMESTAMP_COL,
                DEFAULT_TITLE_COL
            ]
        );
        assert_eq!(calls[0].1[2].1, ColumnType::Float);
    }

    #[test]
    fn test_temporary_staging_file_is_cleaned_up() {
        let loader = RecordingLoader::default();
        MockMovielens::new()
            .get_distributed_df(&loader, &DistributedRequest::new(3))
            .unwrap();

        let calls = loader.calls.borrow();
        let (path, _, existed_during_load) = &calls[0];
        assert!(existed_during_load);
        assert_eq!(path.file_name().unwrap(), "mock_movielens_3.csv");
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_staging_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let request = DistributedRequest::new(3).staging_dir(blocker.join("staging"));
        let err = MockMovielens::new()
            .get_distributed_df(&RecordingLoader::default(), &request)
            .unwrap_err();
        assert!(matches!(err, MockDataError::IoError(_)));
    }

    #[test]
    fn test_unavailable_loader_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let loader = RecordingLoader {
            unavailable: true,
            ..RecordingLoader::default()
        };

        let request = DistributedRequest::new(3).staging_dir(dir.path().join("staging"));
        let err = MockMovielens::new()
            .get_distributed_df(&loader, &request)
            .unwrap_err();

        assert!(matches!(err, MockDataError::SessionUnavailable(_)));
        assert!(loader.calls.borrow().is_empty());
        assert!(!dir.path().join("staging").exists());
    }
}
