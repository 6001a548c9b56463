//! D_anchor engine error type.

use thiserror::Error;

use tc_core::{Classify, Severity};

#[derive(Debug, Error)]
pub enum DAnchorError {
    #[error("engine configuration error: {0}")]
    Config(String),

    #[error("I/O error writing D_anchor output: {0}")]
    Io(#[from] std::io::Error),
}

impl Classify for DAnchorError {
    fn severity(&self) -> Severity {
        match self {
            DAnchorError::Config(_) => Severity::Input,
            DAnchorError::Io(_) => Severity::Fatal,
        }
    }
}

pub type DAnchorResult<T> = Result<T, DAnchorError>;
