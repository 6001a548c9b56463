//! `tc-kbest` — KBestEngine: batched multi-source top-K shortest-travel-time
//! search over the road graph, plus cell aggregation up to T_hex.
//!
//! # Batch loop
//!
//! ```text
//! for batch in anchors.chunks(batch_size):
//!   ① relax   — tc_graph::run_batch over this batch's anchor sources
//!   ② merge   — TopK::merge_from into the global per-node top-K
//! then: aggregate_cells folds node-level top-K up to each requested
//! spatial resolution via the precomputed node->cell table.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                      |
//! |------------|----------------------------------------------|
//! | `parallel` | Runs batches on Rayon's thread pool.         |

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod observer;

pub use aggregate::aggregate_cells;
pub use engine::{KBestEngine, KBestParams};
pub use error::{KBestError, KBestResult};
pub use observer::{KBestObserver, NoopObserver};
