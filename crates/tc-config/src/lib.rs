//! `tc-config` — file-based configuration: POI input, per-entity cutoff/top-K,
//! and the precomputed node-to-cell table.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|--------------------------------------------------------|
//! | [`entity_config`] | `EntityConfigTable`, `EntityCutoff`, CSV loader       |
//! | [`poi`]         | `load_pois_parquet`                                     |
//! | [`cell_table`]  | `CellTable`, CSV loader                                 |
//! | [`error`]       | `ConfigError`, `ConfigResult<T>`                        |
//!
//! All three loaders follow the same shape: buffer rows into a map keyed by
//! the entity they describe, then hand back a lookup structure rather than a
//! raw `Vec` of rows, so callers never have to re-derive the key.

pub mod cell_table;
pub mod entity_config;
pub mod error;
pub mod poi;

pub use cell_table::{load_cell_table_csv, load_cell_table_reader, CellTable};
pub use entity_config::{
    load_entity_config_csv, load_entity_config_reader, EntityConfigTable, EntityCutoff,
};
pub use error::{ConfigError, ConfigResult};
pub use poi::load_pois_parquet;
