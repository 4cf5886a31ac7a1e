//! # Mock Data Crate
//!
//! Generates synthetic MovieLens-like rating tables for testing
//! recommendation code, either as an in-memory [`Table`] or as a table
//! loaded into a distributed session through a CSV staging file.
//!
//! ## Main Components
//!
//! - **types**: Column names, the default header, id aliases, genres
//! - **schema**: Column descriptors and the column-selection policy
//! - **table**: Column-oriented in-memory table
//! - **random**: Injectable random streams
//! - **generator**: `MockMovielens` and `GenerationRequest`
//! - **staging**: CSV staging files
//! - **session**: Distributed-session traits and the in-process `LocalSession`
//! - **distributed**: Generation through a session
//! - **error**: Error types
//!
//! ## Example Usage
//!
//! ```ignore
//! use mock_data::{GenerationRequest, MockMovielens, LocalSession, DistributedRequest};
//!
//! let generator = MockMovielens::new();
//!
//! // 3 rows: userID, itemID and the title column
//! let request = GenerationRequest::new(3)
//!     .with_seed(-1)
//!     .keep_first_n_cols(2)
//!     .keep_genre_col(false);
//! let df = generator.get_df(&request)?;
//! assert_eq!(df.column_names(), vec!["userID", "itemID", "title"]);
//!
//! // Same data shape, loaded through a session; keeps /tmp/out/mock_movielens_10.csv
//! let session = LocalSession::default();
//! let sdf = generator.get_distributed_df(&session, &DistributedRequest::new(10).staging_dir("/tmp/out"))?;
//! assert_eq!(sdf.count(), 10);
//! ```

pub mod distributed;
pub mod error;
pub mod generator;
pub mod random;
pub mod schema;
pub mod session;
pub mod staging;
pub mod table;
pub mod types;

// Re-export commonly used types for convenience
pub use distributed::DistributedRequest;
pub use error::{MockDataError, Result};
pub use generator::{DEFAULT_SEED, DEFAULT_SIZE, GenerationRequest, GeneratorConfig, MockMovielens};
pub use random::{RandomStream, SeededStream};
pub use schema::{ColumnSelection, ColumnType, DefaultColumns, Field, MovieLensColumn, Schema};
pub use session::{
    DistributedTable, LocalSession, LocalSessionFactory, PartitionedTable, SessionConfig,
    SessionFactory, TableLoader,
};
pub use staging::{StagingArea, staging_file_name, write_csv, write_csv_to};
pub use table::{ColumnData, Table, Value};
pub use types::{
    // Column names
    DEFAULT_GENRE_COL,
    DEFAULT_HEADER,
    DEFAULT_ITEM_COL,
    DEFAULT_RATING_COL,
    DEFAULT_TIMESTAMP_COL,
    DEFAULT_TITLE_COL,
    DEFAULT_USER_COL,
    // Type aliases
    ItemId,
    Timestamp,
    UserId,
    // Enums
    Genre,
};
