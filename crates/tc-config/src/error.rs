//! Config-subsystem error type.

use thiserror::Error;

use tc_core::{Classify, Severity};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parquet schema error: {0}")]
    Schema(#[from] parquet::errors::ParquetError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl Classify for ConfigError {
    fn severity(&self) -> Severity {
        match self {
            ConfigError::Parse(_) => Severity::Input,
            ConfigError::Io(_) => Severity::Fatal,
            ConfigError::Schema(_) | ConfigError::Arrow(_) => Severity::Schema,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
