//! `tc-fingerprint` — FingerprintLedger: a SHA-256 staleness digest over
//! anchor inputs, used to gate D_anchor recomputation.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                  |
//! |-----------|--------------------------------------------------------------|
//! | [`engine`]| `Fingerprint`, `compute_fingerprint`, `read_stored_fingerprint`, `write_fingerprint`, `is_stale` |
//! | [`error`] | `FingerprintError`, `FingerprintResult<T>`                |
//!
//! The digest covers `anchors_{mode}.parquet` and
//! `anchor_id_map_{mode}.parquet` concatenated in that order. Absence of a
//! prior digest is always stale. Callers write the new digest only after a
//! successful recompute, so a crash mid-run never leaves a digest that
//! claims outputs are fresh.

pub mod engine;
pub mod error;

pub use engine::{compute_fingerprint, is_stale, read_stored_fingerprint, write_fingerprint, Fingerprint};
pub use error::{FingerprintError, FingerprintResult};
