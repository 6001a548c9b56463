//! `tc-codec` — Codec/Writer: deterministic columnar parquet output for
//! anchors, T_hex, and D_anchor, plus the JSON materialization helper the
//! API layer needs to avoid the anchor↔seconds label-alignment trap.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                 |
//! |------------|-----------------------------------------------------------|
//! | [`parquet`]| Arrow schemas and `RecordBatch` builders per output family |
//! | [`reader`] | Reads `anchors_{mode}.parquet` back into `AnchorSite`s   |
//! | [`writer`] | Atomic (temp-then-rename) parquet writes                |
//! | [`json`]   | Positional anchor_int_id/seconds -> JSON zip             |
//! | [`error`]  | `CodecError`, `CodecResult<T>`                           |
//!
//! All outputs are ZSTD-compressed and row-group-ordered by primary key
//! (`cell_id` for T_hex, `anchor_int_id` for D_anchor) so identical inputs
//! produce byte-identical parquet across runs.

pub mod error;
pub mod json;
pub mod parquet;
pub mod reader;
pub mod writer;

pub use error::{CodecError, CodecResult};
pub use json::{d_anchor_rows_to_json, zip_columns_to_json};
pub use reader::read_anchors_parquet;
pub use writer::{write_anchor_id_map, write_anchors, write_d_anchor, write_parquet_atomic, write_t_hex};
