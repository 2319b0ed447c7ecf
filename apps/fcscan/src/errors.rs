use thiserror::Error;

/// Scan-level error type.
/// Every fallible operation in the grid and job modules returns `Result<T, ScanError>`.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid axis spec: {0}")]
    InvalidAxisSpec(String),

    #[error("Invalid partition request: {0}")]
    InvalidPartitionRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ScanError {
    /// Short machine-readable code, used in log lines and the manifest.
    pub fn code(&self) -> &'static str {
        match self {
            ScanError::InvalidAxisSpec(_) => "INVALID_AXIS_SPEC",
            ScanError::InvalidPartitionRequest(_) => "INVALID_PARTITION_REQUEST",
            ScanError::Io(_) => "IO_ERROR",
            ScanError::Serialization(_) => "SERIALIZATION_ERROR",
            ScanError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
