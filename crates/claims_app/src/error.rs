//! Application errors

use thiserror::Error;

use core_kernel::CoreError;
use domain_claims::ClaimError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Claims(#[from] ClaimError),

    #[error("Failed to read batch file {path}: {source}")]
    BatchFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed batch input: {0}")]
    BatchFormat(#[from] serde_json::Error),
}
