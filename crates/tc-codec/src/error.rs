//! Codec/writer error type.

use thiserror::Error;

use tc_core::{Classify, Severity};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl Classify for CodecError {
    fn severity(&self) -> Severity {
        match self {
            CodecError::Io(_) => Severity::Fatal,
            CodecError::Arrow(_) | CodecError::Parquet(_) => Severity::Schema,
            CodecError::Invariant(_) => Severity::Invariant,
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
