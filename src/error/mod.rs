//! Error handling for the sentiment ETL pipeline.

/// Errors raised by pipeline components
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error resolving a table through the catalog
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Error with schema compatibility
    #[error("Schema error: {0}")]
    Schema(String),

    /// Error resolving startup arguments
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error calling the hosted inference endpoint
    #[error("Inference error: {0}")]
    Inference(String),

    /// Error writing columnar output
    #[error("Write error: {0}")]
    Write(String),
}

/// Result type for pipeline operations. Typed variants cover the pipeline's
/// own failure modes; IO, Parquet, and Arrow failures are wrapped ad hoc with
/// `anyhow::anyhow!` where they occur.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_display_their_concern() {
        let err: anyhow::Error = Error::Catalog("Unknown table: orders".to_string()).into();
        assert_eq!(err.to_string(), "Catalog error: Unknown table: orders");

        let err: anyhow::Error = Error::Write("No record batches to write".to_string()).into();
        assert_eq!(err.to_string(), "Write error: No record batches to write");
    }
}
