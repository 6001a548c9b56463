//! Driver-level error type: wraps every crate's own error so `main` has one
//! place to turn a failure into an exit code via [`Classify`].

use thiserror::Error;

use tc_core::{Classify, Severity};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Graph(#[from] tc_graph::GraphError),

    #[error(transparent)]
    Config(#[from] tc_config::ConfigError),

    #[error(transparent)]
    KBest(#[from] tc_kbest::KBestError),

    #[error(transparent)]
    DAnchor(#[from] tc_danchor::DAnchorError),

    #[error(transparent)]
    Fingerprint(#[from] tc_fingerprint::FingerprintError),

    #[error(transparent)]
    Codec(#[from] tc_codec::CodecError),

    #[error("{0}")]
    Invariant(String),
}

impl Classify for CliError {
    fn severity(&self) -> Severity {
        match self {
            CliError::Graph(e) => e.severity(),
            CliError::Config(e) => e.severity(),
            CliError::KBest(e) => e.severity(),
            CliError::DAnchor(e) => e.severity(),
            CliError::Fingerprint(e) => e.severity(),
            CliError::Codec(e) => e.severity(),
            CliError::Invariant(_) => Severity::Invariant,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
