use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProposalError>;

/// Failures at the file boundary. The extraction engine itself never fails.
#[derive(Error, Debug)]
pub enum ProposalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported input file '{}': expected a .json or .csv file", .0.display())]
    UnsupportedInput(PathBuf),
}
