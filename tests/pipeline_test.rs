//! End-to-end runs over an on-disk review table fixture.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;
use sentiment_etl::catalog::reviews_schema;
use sentiment_etl::writer::OUTPUT_PART_NAME;
use sentiment_etl::{Classifier, Error, Job, JobConfig, Result, read_parquet, write_table};

struct StubClassifier {
    label: &'static str,
    calls: AtomicUsize,
}

impl StubClassifier {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Classifier for StubClassifier {
    fn classify(&self, _text: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.label.to_string())
    }
}

struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn classify(&self, _text: &str) -> Result<String> {
        Err(Error::Inference("endpoint unavailable".to_string()).into())
    }
}

/// Write a reviews table fixture under `<root>/reviews/`
fn write_reviews_fixture(root: &Path, rows: &[(Option<&str>, Option<&str>, Option<&str>)]) {
    let headings = StringArray::from(rows.iter().map(|(h, _, _)| *h).collect::<Vec<_>>());
    let reviews = StringArray::from(rows.iter().map(|(_, r, _)| *r).collect::<Vec<_>>());
    let polarities = StringArray::from(rows.iter().map(|(_, _, p)| *p).collect::<Vec<_>>());
    let batch = RecordBatch::try_new(
        reviews_schema(),
        vec![Arc::new(headings), Arc::new(reviews), Arc::new(polarities)],
    )
    .unwrap();
    write_table(&[batch], &root.join("reviews")).unwrap();
}

fn job_config(root: &Path, output: &Path) -> JobConfig {
    JobConfig {
        table: "reviews".to_string(),
        catalog_root: root.to_path_buf(),
        output_path: output.to_path_buf(),
        ..JobConfig::default()
    }
}

fn column_values(batch: &RecordBatch, name: &str) -> Vec<String> {
    let idx = batch.schema().index_of(name).unwrap();
    let array = batch
        .column(idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    (0..array.len()).map(|i| array.value(i).to_string()).collect()
}

#[test]
fn run_labels_rows_and_drops_polarity() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output");
    write_reviews_fixture(
        dir.path(),
        &[
            (Some("Great"), Some("Loved it"), Some("pos")),
            (None, None, Some("neg")),
        ],
    );

    let job = Job::new(
        job_config(dir.path(), &output),
        StubClassifier::new("POSITIVE"),
    );
    let report = job.run().unwrap();

    assert_eq!(report.rows_read, 2);
    assert_eq!(report.rows_written, 2);
    assert_eq!(report.labelled, 1);
    assert_eq!(report.neutral, 1);
    assert_eq!(report.failed, 0);

    let batches = read_parquet(&output.join(OUTPUT_PART_NAME), None, None).unwrap();
    let batch = &batches[0];
    assert!(batch.schema().index_of("polarity").is_err());
    assert_eq!(
        column_values(batch, "combined_text"),
        vec!["Great. Loved it", ""]
    );
    assert_eq!(column_values(batch, "sentiment"), vec!["POSITIVE", "NEUTRAL"]);
}

#[test]
fn empty_text_rows_never_reach_the_classifier() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output");
    write_reviews_fixture(dir.path(), &[(None, None, None), (None, None, None)]);

    let classifier = StubClassifier::new("POSITIVE");
    let job = Job::new(job_config(dir.path(), &output), classifier);
    let report = job.run().unwrap();

    assert_eq!(report.neutral, 2);
    assert_eq!(report.labelled, 0);
}

#[test]
fn failing_endpoint_degrades_rows_to_error_labels() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output");
    write_reviews_fixture(
        dir.path(),
        &[(Some("Bad"), Some("Broke on day one"), Some("neg"))],
    );

    let job = Job::new(job_config(dir.path(), &output), FailingClassifier);
    let report = job.run().unwrap();

    assert_eq!(report.failed, 1);
    let batches = read_parquet(&output.join(OUTPUT_PART_NAME), None, None).unwrap();
    assert_eq!(column_values(&batches[0], "sentiment"), vec!["ERROR"]);
}

#[test]
fn explicit_table_path_is_resolved_by_directory_name() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output");
    let table_dir = dir.path().join("product_reviews");
    let headings = StringArray::from(vec![Some("Great")]);
    let reviews = StringArray::from(vec![Some("Loved it")]);
    let polarities = StringArray::from(vec![Some("pos")]);
    let batch = RecordBatch::try_new(
        reviews_schema(),
        vec![Arc::new(headings), Arc::new(reviews), Arc::new(polarities)],
    )
    .unwrap();
    write_table(&[batch], &table_dir).unwrap();

    let mut config = job_config(dir.path(), &output);
    config.table_path = Some(table_dir);
    let job = Job::new(config, StubClassifier::new("POSITIVE"));
    let report = job.run().unwrap();

    assert_eq!(report.table, "reviews");
    assert_eq!(report.rows_written, 1);
    let batches = read_parquet(&output.join(OUTPUT_PART_NAME), None, None).unwrap();
    assert_eq!(column_values(&batches[0], "sentiment"), vec!["POSITIVE"]);
}

#[test]
fn unknown_table_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = job_config(dir.path(), &dir.path().join("output"));
    config.table = "orders".to_string();
    let job = Job::new(config, StubClassifier::new("POSITIVE"));
    assert!(job.run().is_err());
}

#[test]
fn missing_table_directory_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    // No fixture written: the catalog resolves but the reader finds nothing.
    let job = Job::new(
        job_config(dir.path(), &dir.path().join("output")),
        StubClassifier::new("POSITIVE"),
    );
    assert!(job.run().is_err());
}
