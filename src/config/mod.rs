//! Job configuration resolved from startup arguments.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default character ceiling for inference payloads. Matches the token-length
/// ceiling of typical sentence-classification models.
pub const DEFAULT_MAX_INFERENCE_CHARS: usize = 512;

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Resolved startup arguments for one job run
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Catalog table name to read
    pub table: String,
    /// Base directory the catalog maps table names under
    pub catalog_root: PathBuf,
    /// Explicit table directory; when set, the table is inferred from the
    /// directory name instead of resolved by catalog name
    pub table_path: Option<PathBuf>,
    /// URL of the hosted sentiment classification endpoint
    pub endpoint: String,
    /// Directory the output Parquet is written to
    pub output_path: PathBuf,
    /// Hard character cutoff applied to text before it is sent to the endpoint
    pub max_inference_chars: usize,
    /// Batch size for Parquet reading
    pub batch_size: usize,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            table: "reviews".to_string(),
            catalog_root: PathBuf::from("."),
            table_path: None,
            endpoint: String::new(),
            output_path: PathBuf::from("output"),
            max_inference_chars: DEFAULT_MAX_INFERENCE_CHARS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl JobConfig {
    /// Resolve the configuration from command-line arguments and environment.
    ///
    /// Arguments are `key=value` pairs (`table=...`, `catalog_root=...`,
    /// `table_path=...`, `endpoint=...`, `output=...`); each falls back to a
    /// `SENTIMENT_ETL_*` environment variable. `endpoint` and `output` are
    /// required, as is `catalog_root` unless an explicit `table_path` is
    /// given.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut catalog_root = env_arg("SENTIMENT_ETL_CATALOG_ROOT");
        let mut table_path = env_arg("SENTIMENT_ETL_TABLE_PATH");
        let mut endpoint = env_arg("SENTIMENT_ETL_ENDPOINT");
        let mut output = env_arg("SENTIMENT_ETL_OUTPUT");
        if let Some(table) = env_arg("SENTIMENT_ETL_TABLE") {
            config.table = table;
        }

        for arg in args {
            let Some((key, value)) = arg.split_once('=') else {
                return Err(Error::Configuration(format!(
                    "Expected key=value argument, got '{arg}'"
                ))
                .into());
            };
            match key {
                "table" => config.table = value.to_string(),
                "catalog_root" => catalog_root = Some(value.to_string()),
                "table_path" => table_path = Some(value.to_string()),
                "endpoint" => endpoint = Some(value.to_string()),
                "output" => output = Some(value.to_string()),
                "max_inference_chars" => {
                    config.max_inference_chars = value.parse().map_err(|_| {
                        Error::Configuration(format!(
                            "max_inference_chars must be a positive integer, got '{value}'"
                        ))
                    })?;
                }
                "batch_size" => {
                    config.batch_size = value.parse().map_err(|_| {
                        Error::Configuration(format!(
                            "batch_size must be a positive integer, got '{value}'"
                        ))
                    })?;
                }
                _ => {
                    return Err(
                        Error::Configuration(format!("Unknown argument '{key}'")).into()
                    );
                }
            }
        }

        config.table_path = table_path.map(PathBuf::from);
        if config.table_path.is_none() || catalog_root.is_some() {
            config.catalog_root = PathBuf::from(required(catalog_root, "catalog_root")?);
        }
        config.endpoint = required(endpoint, "endpoint")?;
        config.output_path = PathBuf::from(required(output, "output")?);
        Ok(config)
    }
}

fn env_arg(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    value.ok_or_else(|| {
        Error::Configuration(format!(
            "Missing required argument '{name}' (or SENTIMENT_ETL_{} environment variable)",
            name.to_uppercase()
        ))
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn resolves_required_arguments() {
        let config = JobConfig::from_args(args(&[
            "table=reviews",
            "catalog_root=/data",
            "endpoint=http://localhost:9000/invocations",
            "output=/out",
        ]))
        .unwrap();
        assert_eq!(config.table, "reviews");
        assert_eq!(config.catalog_root, PathBuf::from("/data"));
        assert_eq!(config.max_inference_chars, DEFAULT_MAX_INFERENCE_CHARS);
    }

    #[test]
    fn table_path_makes_catalog_root_optional() {
        let config = JobConfig::from_args(args(&[
            "table_path=/elsewhere/product_reviews",
            "endpoint=http://localhost:9000/invocations",
            "output=/out",
        ]))
        .unwrap();
        assert_eq!(
            config.table_path,
            Some(PathBuf::from("/elsewhere/product_reviews"))
        );

        let result = JobConfig::from_args(args(&[
            "endpoint=http://localhost:9000/invocations",
            "output=/out",
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_missing_endpoint() {
        let result = JobConfig::from_args(args(&["catalog_root=/data", "output=/out"]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_malformed_argument() {
        let result = JobConfig::from_args(args(&["no-equals-sign"]));
        assert!(result.is_err());
    }
}
