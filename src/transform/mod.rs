//! Column-level transformations over Arrow record batches.
//!
//! These are the dataframe-engine operators the pipeline needs: dropping a
//! column, separator-joined string concatenation, and applying a row-wise
//! mapping function to a string column.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use rayon::prelude::*;

use crate::error::{Error, Result};

/// Remove a column from a record batch
///
/// Dropping a column that is not present is a no-op, matching the tolerant
/// drop of the original engine.
pub fn drop_column(batch: &RecordBatch, name: &str) -> Result<RecordBatch> {
    let Ok(drop_idx) = batch.schema().index_of(name) else {
        return Ok(batch.clone());
    };

    let fields: Vec<Arc<Field>> = batch
        .schema()
        .fields()
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != drop_idx)
        .map(|(_, field)| field.clone())
        .collect();
    let columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != drop_idx)
        .map(|(_, column)| column.clone())
        .collect();

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .map_err(|e| anyhow::anyhow!("Failed to drop column '{name}': {e}"))
}

/// Fetch a named Utf8 column from a batch
fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    let col_idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| Error::Schema(format!("Column '{name}' not found in batch")))?;
    batch
        .column(col_idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| Error::Schema(format!("Column '{name}' is not a string array")).into())
}

/// Append a separator-joined concatenation of two string columns
///
/// Null-skipping `concat_ws` semantics: when both sides are present the
/// result is `left + separator + right`; a null side is skipped along with
/// its separator; two null sides produce an empty string. The output column
/// is non-nullable.
pub fn concat_columns(
    batch: &RecordBatch,
    left: &str,
    right: &str,
    separator: &str,
    output: &str,
) -> Result<RecordBatch> {
    let left_array = string_column(batch, left)?;
    let right_array = string_column(batch, right)?;

    let mut builder = StringBuilder::new();
    for row in 0..batch.num_rows() {
        let left_value = (!left_array.is_null(row)).then(|| left_array.value(row));
        let right_value = (!right_array.is_null(row)).then(|| right_array.value(row));
        match (left_value, right_value) {
            (Some(l), Some(r)) => {
                builder.append_value(format!("{l}{separator}{r}"));
            }
            (Some(l), None) => builder.append_value(l),
            (None, Some(r)) => builder.append_value(r),
            (None, None) => builder.append_value(""),
        }
    }

    append_column(batch, output, Arc::new(builder.finish()))
}

/// Apply a row-wise mapping function to a nullable string column and append
/// the result as a new non-nullable Utf8 column
///
/// `f` receives `None` for null rows and must always produce a value; batches
/// are processed in parallel and rows are independent, so no cross-row state
/// is available to the mapping function.
pub fn map_string_column<F>(
    batches: &[RecordBatch],
    input: &str,
    output: &str,
    f: F,
) -> Result<Vec<RecordBatch>>
where
    F: Fn(Option<&str>) -> String + Send + Sync,
{
    batches
        .par_iter()
        .map(|batch| {
            let input_array = string_column(batch, input)?;
            let mut builder = StringBuilder::new();
            for row in 0..batch.num_rows() {
                let value = (!input_array.is_null(row)).then(|| input_array.value(row));
                builder.append_value(f(value));
            }
            append_column(batch, output, Arc::new(builder.finish()))
        })
        .collect()
}

/// Append a non-nullable Utf8 column to a batch
fn append_column(batch: &RecordBatch, name: &str, column: ArrayRef) -> Result<RecordBatch> {
    let mut fields: Vec<Arc<Field>> = batch.schema().fields().iter().cloned().collect();
    fields.push(Arc::new(Field::new(name, DataType::Utf8, false)));

    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    columns.push(column);

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .map_err(|e| anyhow::anyhow!("Failed to append column '{name}': {e}"))
}
