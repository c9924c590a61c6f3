//! Catalog resolution for named tables.
//!
//! The catalog is a metadata registry mapping a table name to its expected
//! Arrow schema and its physical storage location under a base directory.
//! Resolution is pure metadata work; file existence is checked by the reader.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};

use crate::error::{Error, Result};

/// Canonical schema of the review input table
#[must_use]
pub fn reviews_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("heading", DataType::Utf8, true),
        Field::new("review", DataType::Utf8, true),
        Field::new("polarity", DataType::Utf8, true),
    ]))
}

/// A resolved catalog entry for a named table
#[derive(Debug, Clone)]
pub struct TableEntry {
    /// Catalog table name
    pub name: String,
    /// Directory holding the table's Parquet files
    pub path: PathBuf,
    /// Expected Arrow schema of the table
    pub schema: Arc<Schema>,
}

/// Metadata registry mapping table names to schema and storage location
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
}

impl Catalog {
    /// Create a catalog over a base directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a table entry from its catalog name
    pub fn resolve(&self, name: &str) -> Result<TableEntry> {
        let schema = match name.to_lowercase().as_str() {
            "reviews" => reviews_schema(),
            _ => return Err(Error::Catalog(format!("Unknown table: {name}")).into()),
        };
        Ok(TableEntry {
            name: name.to_lowercase(),
            path: self.root.join(name.to_lowercase()),
            schema,
        })
    }

    /// Resolve a table entry from a storage path by inferring the table name
    /// from the directory name
    pub fn resolve_path(&self, path: &Path) -> Result<TableEntry> {
        let dir_name = path
            .file_name()
            .and_then(|f| f.to_str())
            .ok_or_else(|| Error::Catalog(format!("Invalid table path: {}", path.display())))?;

        let lower_name = dir_name.to_lowercase();
        if lower_name.contains("review") {
            return Ok(TableEntry {
                name: "reviews".to_string(),
                path: path.to_path_buf(),
                schema: reviews_schema(),
            });
        }
        Err(Error::Catalog(format!("Cannot infer table from path: {}", path.display())).into())
    }
}
