//! Fingerprint ledger error type.

use thiserror::Error;

use tc_core::{Classify, Severity};

#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("I/O error reading fingerprint inputs: {0}")]
    Io(#[from] std::io::Error),
}

impl Classify for FingerprintError {
    fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

pub type FingerprintResult<T> = Result<T, FingerprintError>;
