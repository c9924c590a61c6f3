//! Snappy-compressed Parquet output.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::{Error, Result};
use crate::utils::logging::{log_stage, log_stage_done};

/// File name of the single output part
///
/// The job writes no partition columns, so the whole record set lands in one
/// part file. An existing part file is replaced.
pub const OUTPUT_PART_NAME: &str = "part-00000.parquet";

fn writer_properties() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .set_created_by(concat!("sentiment-etl ", env!("CARGO_PKG_VERSION")).to_string())
        .build()
}

/// Write a record set to a directory as Snappy-compressed Parquet
///
/// Creates the directory if needed and returns the written part path. All
/// batches must share one schema; an empty record set is an error since no
/// schema is available to write.
pub fn write_table(batches: &[RecordBatch], dir: &Path) -> Result<PathBuf> {
    let start = std::time::Instant::now();
    let Some(first) = batches.first() else {
        return Err(Error::Write("No record batches to write".to_string()).into());
    };

    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Write(format!(
            "Failed to create output directory {}: {e}",
            dir.display()
        ))
    })?;

    let part_path = dir.join(OUTPUT_PART_NAME);
    log_stage("Writing parquet output to", &part_path);

    let file = File::create(&part_path).map_err(|e| {
        Error::Write(format!(
            "Failed to create output file {}: {e}",
            part_path.display()
        ))
    })?;

    let mut writer = ArrowWriter::try_new(file, first.schema(), Some(writer_properties()))
        .map_err(|e| Error::Write(format!("Failed to create parquet writer: {e}")))?;
    for batch in batches {
        writer
            .write(batch)
            .map_err(|e| Error::Write(format!("Failed to write record batch: {e}")))?;
    }
    writer
        .close()
        .map_err(|e| Error::Write(format!("Failed to finalize parquet output: {e}")))?;

    let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
    log_stage_done("Parquet write", &part_path, rows, "rows", Some(start.elapsed()));
    Ok(part_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_parquet;
    use arrow::array::StringArray;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn sample_batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "sentiment",
            DataType::Utf8,
            false,
        )]));
        let values = StringArray::from(vec!["POSITIVE", "NEGATIVE"]);
        RecordBatch::try_new(schema, vec![Arc::new(values)]).unwrap()
    }

    #[test]
    fn written_output_round_trips_through_the_reader() {
        let dir = tempfile::tempdir().unwrap();
        let part_path = write_table(&[sample_batch()], dir.path()).unwrap();
        assert_eq!(part_path, dir.path().join(OUTPUT_PART_NAME));

        let batches = read_parquet(&part_path, None, None).unwrap();
        assert_eq!(batches.iter().map(RecordBatch::num_rows).sum::<usize>(), 2);
        assert!(batches[0].schema().index_of("sentiment").is_ok());
    }

    #[test]
    fn empty_record_set_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_table(&[], dir.path()).is_err());
    }
}
