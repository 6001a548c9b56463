//! Shared exit-code taxonomy.
//!
//! Every `tc-*` crate defines its own `thiserror` error enum (matching the
//! rest of the workspace's per-crate-error convention), but the CLI driver
//! needs one uniform way to turn *any* of them into the exit code from the
//! CLI contract. That's what [`Severity`]/[`Classify`] are for — each
//! crate's error type implements [`Classify`] instead of the driver matching
//! on every concrete variant.

use thiserror::Error;

/// Which of the taxonomy's exit-code buckets an error belongs to.
///
/// `BudgetExceeded` and `Cancelled` from the error taxonomy are not
/// represented here: a budget overrun is recovered by clamping (counted,
/// not an error) and cancellation is a clean, non-error exit handled by the
/// driver directly.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Severity {
    /// Missing or malformed input file. Exit code 2.
    Input,
    /// Parquet schema does not match the canonical definition. Exit code 2.
    Schema,
    /// Invariant violation (duplicate id, self-loop, inconsistent table). Exit code 3.
    Invariant,
    /// Anything else: I/O failure, graph inconsistency, fatal runtime error. Exit code 1.
    Fatal,
}

impl Severity {
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Input | Severity::Schema => 2,
            Severity::Invariant => 3,
            Severity::Fatal => 1,
        }
    }
}

/// Implemented by every crate-local error enum so the CLI driver can map it
/// to an exit code without matching on concrete variants.
pub trait Classify {
    fn severity(&self) -> Severity;
}

/// A minimal error type for `tc-core` itself — used only by primitives that
/// live in this crate (currently none do I/O), and as the `#[from]` target
/// for `std::io::Error` in crates that don't need a richer taxonomy split.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

impl Classify for CoreError {
    fn severity(&self) -> Severity {
        match self {
            CoreError::Io(_) => Severity::Fatal,
            CoreError::Config(_) => Severity::Input,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
