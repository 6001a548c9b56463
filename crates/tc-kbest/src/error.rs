//! K-best engine error type.

use thiserror::Error;

use tc_core::{Classify, Severity};

#[derive(Debug, Error)]
pub enum KBestError {
    #[error("engine configuration error: {0}")]
    Config(String),

    #[error("node {0} referenced by an anchor is out of range for this graph")]
    AnchorNodeOutOfRange(u32),
}

impl Classify for KBestError {
    fn severity(&self) -> Severity {
        match self {
            KBestError::Config(_) => Severity::Input,
            KBestError::AnchorNodeOutOfRange(_) => Severity::Invariant,
        }
    }
}

pub type KBestResult<T> = Result<T, KBestError>;
