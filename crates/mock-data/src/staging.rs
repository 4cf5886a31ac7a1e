//! Staging files hand a generated table to a distributed engine.
//!
//! A staging file is comma-separated text with a header row, named
//! `mock_movielens_<size>.csv`. It lives either in a caller-supplied directory,
//! where it is left for inspection, or in a temporary directory that is
//! removed when the [`StagingArea`] is dropped.

use crate::error::Result;
use crate::table::{ColumnData, Table};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// File name of the staging file for a table of `size` rows
pub fn staging_file_name(size: usize) -> String {
    format!("mock_movielens_{}.csv", size)
}

/// Directory that receives staging files
#[derive(Debug)]
pub enum StagingArea {
    /// Caller-owned directory; files written here outlive the call
    Directory(PathBuf),
    /// Scratch directory deleted on drop
    Temporary(TempDir),
}

impl StagingArea {
    /// Use `dir` if given (creating it when missing), otherwise a fresh
    /// temporary directory.
    pub fn new(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                Ok(StagingArea::Directory(dir.to_path_buf()))
            }
            None => Ok(StagingArea::Temporary(tempfile::tempdir()?)),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            StagingArea::Directory(dir) => dir,
            StagingArea::Temporary(dir) => dir.path(),
        }
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, StagingArea::Temporary(_))
    }

    /// Write `table` as `mock_movielens_<rows>.csv` and return the file path.
    pub fn stage(&self, table: &Table) -> Result<PathBuf> {
        let path = self.path().join(staging_file_name(table.num_rows()));
        write_csv(table, &path)?;
        Ok(path)
    }
}

/// Serialize `table` to `path` as CSV with a header row.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    write_records(table, &mut writer)?;
    writer.flush()?;
    debug!("Wrote {} rows to {}", table.num_rows(), path.display());
    Ok(())
}

/// Serialize `table` as CSV into any writer (e.g. stdout).
pub fn write_csv_to<W: std::io::Write>(table: &Table, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    write_records(table, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_records<W: std::io::Write>(table: &Table, writer: &mut csv::Writer<W>) -> Result<()> {
    writer.write_record(table.column_names())?;

    let mut record: Vec<String> = Vec::with_capacity(table.num_columns());
    for row in 0..table.num_rows() {
        record.clear();
        for column in table.columns() {
            record.push(match column {
                ColumnData::Int(v) => v[row].to_string(),
                ColumnData::Float(v) => v[row].to_string(),
                ColumnData::Str(v) => v[row].clone(),
            });
        }
        writer.write_record(&record)?;
    }
    Ok(())
}
