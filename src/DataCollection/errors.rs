//! Error type of a collection run.

use crate::Thermodynamics::DBhandlers::NIST_parser::NistError;
use thiserror::Error;

/// Failures that end a collection run. The run-level fallback replaces the whole
/// dataset with synthetic rows when one of these escapes.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("WebBook error: {0}")]
    Nist(#[from] NistError),
    #[error("Invalid noise distribution: {0}")]
    Noise(#[from] rand_distr::NormalError),
    #[error("WebBook unreachable: all {attempted} compound lookups failed on the network")]
    SourceUnreachable { attempted: usize },
}
