//! `tc-graph` — road network CSR graph, anchor snapping, and the bucketed
//! multi-source SSSP kernel shared by the K-best and D_anchor engines.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`          |
//! | [`sssp`]    | `run_batch` (bucketed multi-source Dijkstra), `TopK`        |
//! | [`anchor`]  | `snap_poi`, `build_anchor_sites` (AnchorSiteBuilder)        |
//! | [`osm`]     | `load_from_pbf` (feature = `"osm"` only)                    |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|-------------------------------------------------------------|
//! | `osm`      | Enables OSM PBF loading via the `osmpbf` crate.          |
//! | `parallel` | Batches in the SSSP kernel's callers run via `rayon`.    |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.       |

pub mod anchor;
pub mod error;
pub mod network;
pub mod sssp;

#[cfg(feature = "osm")]
pub mod osm;

pub use anchor::{build_anchor_sites, snap_poi};
pub use error::{GraphError, GraphResult};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use sssp::{run_batch, TopK, TopKEntry};
