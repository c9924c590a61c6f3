//! Module for reading a catalog table's Parquet files into Arrow record batches.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use rayon::prelude::*;

use crate::catalog::TableEntry;
use crate::config::DEFAULT_BATCH_SIZE;
use crate::error::{Error, Result};
use crate::utils::logging::{log_skip, log_stage, log_stage_done};

/// Validates that a directory exists and is a directory
///
/// # Errors
/// Returns an error if the directory does not exist or is not a directory
pub fn validate_directory(dir: &Path) -> Result<()> {
    if !dir.exists() || !dir.is_dir() {
        return Err(Error::Catalog(format!(
            "Table directory does not exist: {}",
            dir.display()
        ))
        .into());
    }
    Ok(())
}

/// Helper for creating a projection mask from the expected schema
///
/// Fields of `schema` that do not exist in the file are skipped with a
/// warning. Returns `None` when no fields match, in which case all columns
/// are read.
#[must_use]
pub fn create_projection(
    schema: &Schema,
    file_schema: &Schema,
    parquet_schema: &parquet::schema::types::SchemaDescriptor,
) -> Option<ProjectionMask> {
    let projection: Vec<usize> = schema
        .fields()
        .iter()
        .filter_map(|f| {
            let field_name = f.name();
            file_schema.index_of(field_name).map_or_else(
                |_| {
                    log_skip(
                        &format!("Column '{field_name}' missing from parquet file, skipping"),
                        None,
                    );
                    None
                },
                Some,
            )
        })
        .collect_vec();

    if projection.is_empty() {
        log_skip("Projection matched no columns, reading the full file", None);
        None
    } else {
        Some(ProjectionMask::leaves(parquet_schema, projection))
    }
}

/// Read a single Parquet file into Arrow record batches
///
/// # Arguments
/// * `path` - Path to the Parquet file
/// * `projection` - Optional Arrow schema selecting the columns to read
/// * `batch_size` - Optional batch size override
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid Parquet
pub fn read_parquet(
    path: &Path,
    projection: Option<&Schema>,
    batch_size: Option<usize>,
) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    log_stage("Reading parquet", path);

    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open file {}: {}", path.display(), e))?;

    let reader_builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| anyhow::anyhow!("Failed to read parquet file {}: {}", path.display(), e))?
        .with_batch_size(batch_size.unwrap_or(DEFAULT_BATCH_SIZE));

    let reader = if let Some(schema) = projection {
        let file_schema = reader_builder.schema().as_ref().clone();
        let mask = create_projection(schema, &file_schema, reader_builder.parquet_schema());
        match mask {
            Some(mask) => reader_builder.with_projection(mask),
            None => reader_builder,
        }
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build parquet reader: {e}"))?
    } else {
        reader_builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build parquet reader: {e}"))?
    };

    let batches: Vec<RecordBatch> = reader
        .map(|batch_result| {
            batch_result.map_err(|e| anyhow::anyhow!("Failed to read record batch: {e}"))
        })
        .collect::<Result<_>>()?;

    log_stage_done("Parquet read", path, batches.len(), "batches", Some(start.elapsed()));
    Ok(batches)
}

/// Find all Parquet files in a directory, in deterministic name order
///
/// # Errors
/// Returns an error if directory reading fails
pub fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    log_stage("Scanning for parquet files in", dir);
    validate_directory(dir)?;

    let parquet_files = std::fs::read_dir(dir)
        .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?
        .filter_map(|entry_result| match entry_result {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && path.extension().is_some_and(|ext| ext == "parquet") {
                    Some(Ok(path))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(anyhow::anyhow!("Failed to read directory entry: {e}"))),
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .sorted()
        .collect_vec();

    if parquet_files.is_empty() {
        log_skip("No parquet files under table directory", Some(dir));
    } else {
        log_stage_done("Scan", dir, parquet_files.len(), "parquet files", None);
    }

    Ok(parquet_files)
}

/// Load all Parquet files of a resolved catalog table in parallel
///
/// Batches are concatenated in file order; rows within a file keep their
/// original order.
///
/// # Errors
/// Returns an error if directory reading fails or any file cannot be read
pub fn load_table(
    entry: &TableEntry,
    projection: Option<&Schema>,
    batch_size: Option<usize>,
) -> Result<Vec<RecordBatch>> {
    let parquet_files = find_parquet_files(&entry.path)?;
    if parquet_files.is_empty() {
        return Ok(Vec::new());
    }

    let all_batches: Vec<Result<Vec<RecordBatch>>> = parquet_files
        .par_iter()
        .map(|path| read_parquet(path, projection, batch_size))
        .collect();

    let mut combined_batches = Vec::new();
    for result in all_batches {
        combined_batches.extend(result?);
    }

    log::info!(
        "Loaded {} batches from {} Parquet files for table '{}'",
        combined_batches.len(),
        parquet_files.len(),
        entry.name
    );

    Ok(combined_batches)
}
