//! `tc-danchor` — DAnchorEngine: per-entity nearest-anchor travel times and
//! their Hive-partitioned output layout.
//!
//! # Crate layout
//!
//! | Module    | Contents                                              |
//! |-----------|----------------------------------------------------------|
//! | [`engine`]| `DAnchorEngine::compute_slice`                           |
//! | [`layout`]| `partition_dir`, `should_recompute`                      |
//! | [`error`] | `DAnchorError`, `DAnchorResult<T>`                       |
//!
//! One call to `compute_slice` is one `(mode, entity_kind, entity_id)`
//! output partition. The engine itself doesn't know about incrementality —
//! callers consult [`tc_fingerprint`] and `--force` to decide which
//! partitions are worth recomputing, via [`layout::should_recompute`].

pub mod engine;
pub mod error;
pub mod layout;

pub use engine::DAnchorEngine;
pub use error::{DAnchorError, DAnchorResult};
pub use layout::{partition_dir, should_recompute};
