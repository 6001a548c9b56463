//! Shared output row types. Kept here (rather than in the crate that builds
//! or the crate that writes them) so the K-best/D_anchor engines and the
//! codec agree on field layout without either depending on the other.

use crate::{AnchorIntId, Seconds};

/// One row of the T_hex long-form table: `(cell_id, anchor_int_id, seconds,
/// resolution)`. A cell's full row set is sorted ascending by `seconds` with
/// no duplicate `anchor_int_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct THexRow {
    pub cell_id: String,
    pub anchor_int_id: AnchorIntId,
    pub seconds: Seconds,
    pub resolution: u8,
}

/// One row of a D_anchor slice: `anchor_int_id -> seconds` for a single
/// `(mode, entity_kind, entity_id)` partition. `seconds` is
/// `Seconds::UNREACHABLE` for anchors with no path within the entity's
/// cutoff; such rows are still emitted so downstream joins stay complete.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DAnchorRow {
    pub anchor_int_id: AnchorIntId,
    pub seconds: Seconds,
}

/// Which entity kind a D_anchor partition is keyed by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Category,
    Brand,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Category => "category",
            EntityKind::Brand => "brand",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(EntityKind::Category),
            "brand" => Ok(EntityKind::Brand),
            _ => Err(format!("unknown entity kind {s:?} (expected category|brand)")),
        }
    }
}
