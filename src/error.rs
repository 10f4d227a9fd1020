//! Error type shared by all report handlers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// A finding was rejected at ingestion; the handler state is unchanged.
    #[error("invalid finding: {0}")]
    InvalidFinding(String),

    /// Writing to the output sink failed. Only the first failure is kept.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// A message could not be decoded from, or encoded to, JSON.
    #[error("invalid JSON message: {0}")]
    Json(#[from] serde_json::Error),

    /// At least one vulnerability is reachable from the scanned code.
    #[error("vulnerabilities found")]
    VulnerabilitiesFound,
}

impl ReportError {
    /// True for the signal returned by a successful flush of a vulnerable target.
    pub fn is_vulnerabilities_found(&self) -> bool {
        matches!(self, ReportError::VulnerabilitiesFound)
    }
}

pub type Result<T, E = ReportError> = std::result::Result<T, E>;
