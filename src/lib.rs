//! A batch ETL pipeline that reads a review table from a managed catalog,
//! derives a combined text field, labels each row's sentiment through a
//! hosted classification endpoint, and writes the result as Snappy-compressed
//! Parquet with a best-effort data-quality check.

pub mod catalog;
pub mod config;
pub mod error;
pub mod inference;
pub mod job;
pub mod quality;
pub mod reader;
pub mod transform;
pub mod utils;
pub mod writer;

// Re-export the most common types for easier use
// Core types
pub use catalog::{Catalog, TableEntry};
pub use config::JobConfig;
pub use error::{Error, Result};
pub use inference::{
    Classifier, ERROR_LABEL, EndpointClassifier, NEUTRAL_LABEL, Sentiment, sentiment_for,
};
pub use job::{Job, RunReport};

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;

// Operators
pub use quality::{Rule, RuleOutcome};
pub use reader::{load_table, read_parquet};
pub use transform::{concat_columns, drop_column, map_string_column};
pub use writer::write_table;
