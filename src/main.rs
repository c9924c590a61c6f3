use log::info;
use sentiment_etl::{EndpointClassifier, Job, JobConfig, Result};

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = JobConfig::from_args(std::env::args().skip(1))?;
    info!(
        "Starting sentiment job: table '{}' from {} -> {}",
        config.table,
        config.catalog_root.display(),
        config.output_path.display()
    );

    let classifier = EndpointClassifier::new(config.endpoint.clone());
    let job = Job::new(config, classifier);
    let report = job.run()?;

    info!(
        "Run complete: {} of {} rows written in {:?}",
        report.rows_written, report.rows_read, report.elapsed
    );
    Ok(())
}
