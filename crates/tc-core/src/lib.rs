//! `tc-core` — foundational types for the townscout routing/factorization engine.
//!
//! This crate is a dependency of every other `tc-*` crate. It intentionally
//! has no `tc-*` dependencies and a minimal external footprint (`thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|--------------------------------------------------------|
//! | [`ids`]       | `NodeId`, `EdgeId`, `AnchorIntId`, `Seconds`          |
//! | [`geo`]       | `GeoPoint`, haversine distance, local planar offset   |
//! | [`mode`]      | `TravelMode` (drive / walk)                           |
//! | [`anchor`]    | `Poi`, `AnchorSite`, `AnchorIdMapRow`                 |
//! | [`schema`]    | `THexRow`, `DAnchorRow`, `EntityKind`                 |
//! | [`error`]     | `Severity`, `Classify` — shared exit-code taxonomy    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod anchor;
pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;
pub mod schema;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use anchor::{AnchorIdMapRow, AnchorSite, Poi};
pub use error::{Classify, Severity};
pub use geo::GeoPoint;
pub use ids::{AnchorIntId, EdgeId, NodeId, Seconds};
pub use mode::TravelMode;
pub use schema::{DAnchorRow, EntityKind, THexRow};
