//! Distributed-session collaborators.
//!
//! The distributed path only needs three capabilities from an engine:
//!
//! - [`SessionFactory`]: hand out a session
//! - [`TableLoader`]: load a staged CSV file using an explicit column-type mapping
//! - [`DistributedTable`]: report a row count and a schema
//!
//! [`LocalSession`] is an in-process engine implementing them. It reads the
//! staged file once, splits the rows into partitions and keeps them in
//! memory, so the returned table does not depend on the staging file anymore.

use crate::error::{MockDataError, Result};
use crate::schema::{ColumnType, Field};
use crate::table::{ColumnData, Table};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument};

/// A table owned by a distributed engine
pub trait DistributedTable {
    /// Number of rows across all partitions
    fn count(&self) -> usize;

    /// Ordered column descriptors
    fn schema(&self) -> &[Field];

    fn field(&self, name: &str) -> Option<&Field> {
        self.schema().iter().find(|f| f.name == name)
    }
}

/// Loads staged files into distributed tables
pub trait TableLoader {
    type Table: DistributedTable;

    /// Fail early when the engine cannot accept loads anymore.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    /// Load a CSV file with a header row whose columns match `types` in order.
    fn load_csv(&self, path: &Path, types: &[(String, ColumnType)]) -> Result<Self::Table>;
}

/// Creates sessions
pub trait SessionFactory {
    type Session: TableLoader;

    fn session(&self) -> Result<Self::Session>;
}

/// Settings of a [`LocalSession`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub app_name: String,
    /// Upper bound on partitions per loaded table
    pub partitions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app_name: "mock-movielens".to_string(),
            partitions: rayon::current_num_threads().max(1),
        }
    }
}

impl SessionConfig {
    /// Read a JSON config; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        let partitions = config.partitions;
        Ok(config.with_partitions(partitions))
    }

    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions.max(1);
        self
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }
}

/// Table whose rows are split across in-memory partitions
#[derive(Debug, Clone)]
pub struct PartitionedTable {
    fields: Vec<Field>,
    partitions: Vec<Table>,
}

impl PartitionedTable {
    /// Split `table` into at most `partitions` contiguous, near-equal partitions.
    pub fn from_table(table: Table, partitions: usize) -> Self {
        let fields = table.fields().to_vec();
        let rows = table.num_rows();
        let partitions = partitions.max(1);
        let chunk = rows.div_ceil(partitions).max(1);

        let parts = if rows == 0 {
            vec![table]
        } else {
            (0..rows)
                .step_by(chunk)
                .map(|start| table.slice(start, chunk))
                .collect()
        };

        Self {
            fields,
            partitions: parts,
        }
    }

    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    pub fn partitions(&self) -> &[Table] {
        &self.partitions
    }

    /// Gather all partitions back into one local table
    pub fn collect(&self) -> Result<Table> {
        Table::concat(self.fields.clone(), &self.partitions)
    }
}

impl DistributedTable for PartitionedTable {
    fn count(&self) -> usize {
        self.partitions.par_iter().map(|p| p.num_rows()).sum()
    }

    fn schema(&self) -> &[Field] {
        &self.fields
    }
}

/// In-process engine backed by rayon
#[derive(Debug)]
pub struct LocalSession {
    config: SessionConfig,
    active: AtomicBool,
}

impl LocalSession {
    pub fn new(config: SessionConfig) -> Self {
        info!(
            "Starting session '{}' with {} partitions",
            config.app_name, config.partitions
        );
        Self {
            config,
            active: AtomicBool::new(true),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stop the session; later loads fail with `SessionUnavailable`.
    pub fn stop(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            info!("Stopped session '{}'", self.config.app_name);
        }
    }

    fn read_typed(&self, path: &Path, types: &[(String, ColumnType)]) -> Result<Table> {
        let mut reader = csv::Reader::from_path(path)?;

        let found: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let expected: Vec<String> = types.iter().map(|(name, _)| name.clone()).collect();
        if found != expected {
            return Err(MockDataError::SchemaMismatch { expected, found });
        }

        let mut columns: Vec<ColumnData> = types
            .iter()
            .map(|(_, ty)| ColumnData::with_capacity(*ty, 0))
            .collect();

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            // Line 1 is the header
            let line = idx + 2;
            for ((name, _), (column, raw)) in types.iter().zip(columns.iter_mut().zip(record.iter()))
            {
                column
                    .push_parsed(raw)
                    .map_err(|reason| MockDataError::ParseError {
                        column: name.clone(),
                        line,
                        reason,
                    })?;
            }
        }

        let fields = types
            .iter()
            .map(|(name, ty)| Field::new(name.clone(), *ty))
            .collect();
        Table::new(fields, columns)
    }
}

impl Default for LocalSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl TableLoader for LocalSession {
    type Table = PartitionedTable;

    fn ensure_available(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(MockDataError::SessionUnavailable(format!(
                "session '{}' has been stopped",
                self.config.app_name
            )))
        }
    }

    #[instrument(skip(self, path, types), fields(path = %path.display()))]
    fn load_csv(&self, path: &Path, types: &[(String, ColumnType)]) -> Result<PartitionedTable> {
        self.ensure_available()?;

        let table = self.read_typed(path, types)?;
        let loaded = PartitionedTable::from_table(table, self.config.partitions);
        debug!(
            "Loaded {} rows into {} partitions",
            loaded.count(),
            loaded.num_partitions()
        );
        Ok(loaded)
    }
}

/// Hands out [`LocalSession`]s sharing one config
#[derive(Debug, Clone, Default)]
pub struct LocalSessionFactory {
    config: SessionConfig,
}

impl LocalSessionFactory {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }
}

impl SessionFactory for LocalSessionFactory {
    type Session = LocalSession;

    fn session(&self) -> Result<LocalSession> {
        Ok(LocalSession::new(self.config.clone()))
    }
}
