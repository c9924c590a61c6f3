//! Job lifecycle: one batch run from catalog read to committed output.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use arrow::record_batch::RecordBatch;

use crate::catalog::Catalog;
use crate::config::JobConfig;
use crate::error::Result;
use crate::inference::{Classifier, Sentiment, sentiment_for};
use crate::quality::{self, Rule};
use crate::transform::{concat_columns, drop_column, map_string_column};
use crate::utils::progress::{create_row_progress_bar, finish_progress_bar};
use crate::{reader, writer};

/// Summary of one completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Catalog table the run read
    pub table: String,
    /// Rows read from the input table
    pub rows_read: usize,
    /// Rows written to the output
    pub rows_written: usize,
    /// Rows labelled by the endpoint
    pub labelled: usize,
    /// Rows with empty input text, labelled NEUTRAL without a call
    pub neutral: usize,
    /// Rows whose inference call failed, labelled ERROR
    pub failed: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// A configured batch job over one catalog table
pub struct Job<C: Classifier> {
    config: JobConfig,
    classifier: C,
}

impl<C: Classifier> Job<C> {
    /// Create a job from resolved startup arguments and a classifier
    pub fn new(config: JobConfig, classifier: C) -> Self {
        Self { config, classifier }
    }

    /// Execute the run: read, transform, label, check quality, write
    ///
    /// Row-level inference failures surface only as ERROR labels in the
    /// output; any other failure aborts the run and propagates to the caller.
    pub fn run(&self) -> Result<RunReport> {
        let start = Instant::now();
        let config = &self.config;

        let catalog = Catalog::new(&config.catalog_root);
        let entry = match &config.table_path {
            Some(path) => catalog.resolve_path(path)?,
            None => catalog.resolve(&config.table)?,
        };

        let batches = reader::load_table(&entry, Some(&entry.schema), Some(config.batch_size))?;
        let rows_read: usize = batches.iter().map(RecordBatch::num_rows).sum();
        log::info!("Read {} rows from table '{}'", rows_read, entry.name);

        // The polarity column is unused downstream; drop it before deriving
        // the combined text.
        let batches = batches
            .iter()
            .map(|batch| drop_column(batch, "polarity"))
            .collect::<Result<Vec<_>>>()?;
        let batches = batches
            .iter()
            .map(|batch| concat_columns(batch, "heading", "review", ". ", "combined_text"))
            .collect::<Result<Vec<_>>>()?;

        let (batches, labelled, neutral, failed) = self.label_batches(&batches)?;

        let outcomes = quality::evaluate(&[Rule::ColumnCountGreaterThan(0)], &batches);
        quality::publish(&outcomes);

        writer::write_table(&batches, &config.output_path)?;
        let rows_written: usize = batches.iter().map(RecordBatch::num_rows).sum();

        let report = RunReport {
            table: entry.name,
            rows_read,
            rows_written,
            labelled,
            neutral,
            failed,
            elapsed: start.elapsed(),
        };
        log::info!(
            "Job committed: table '{}', {} rows written ({} labelled, {} neutral, {} failed) in {:?}",
            report.table,
            report.rows_written,
            report.labelled,
            report.neutral,
            report.failed,
            report.elapsed
        );
        Ok(report)
    }

    /// Apply the inference adapter row-wise and append the sentiment column
    fn label_batches(
        &self,
        batches: &[RecordBatch],
    ) -> Result<(Vec<RecordBatch>, usize, usize, usize)> {
        let total_rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
        let progress = create_row_progress_bar(total_rows as u64, Some("labelling sentiment"));

        let labelled = AtomicUsize::new(0);
        let neutral = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);

        let labelled_batches =
            map_string_column(batches, "combined_text", "sentiment", |text| {
                let sentiment = sentiment_for(&self.classifier, text, self.config.max_inference_chars);
                match &sentiment {
                    Sentiment::Label(_) => labelled.fetch_add(1, Ordering::Relaxed),
                    Sentiment::Neutral => neutral.fetch_add(1, Ordering::Relaxed),
                    Sentiment::Failed(_) => failed.fetch_add(1, Ordering::Relaxed),
                };
                progress.inc(1);
                sentiment.label().to_string()
            })?;

        finish_progress_bar(&progress, Some("sentiment labelled"));
        Ok((
            labelled_batches,
            labelled.into_inner(),
            neutral.into_inner(),
            failed.into_inner(),
        ))
    }
}
