//! Shared record types for the anchor/POI data model — carried by the
//! builder (`tc-graph`), the writer (`tc-codec`), and the engines that
//! consume anchor ids (`tc-kbest`, `tc-danchor`) so none of them needs its
//! own copy of the field layout.

use uuid::Uuid;

use crate::{AnchorIntId, NodeId};

/// A canonical point-of-interest record, as ingested from upstream. Polygon
/// reduction to entry points happens upstream; this engine only ever sees
/// point coordinates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Poi {
    pub poi_id: u64,
    pub brand_id: Option<u32>,
    pub category_id: u32,
    pub lon: f32,
    pub lat: f32,
    pub source: String,
}

/// A road-graph node carrying one or more POIs in a given mode.
///
/// `site_id` is the deterministic `uuid5("mode|node_id")` identity;
/// `anchor_int_id` is the dense integer assigned by sorting `site_id`
/// ascending across all sites in a mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorSite {
    pub anchor_int_id: AnchorIntId,
    pub site_id: Uuid,
    pub node_id: NodeId,
    pub lon: f32,
    pub lat: f32,
    pub poi_ids: Vec<u64>,
    pub category_ids: Vec<u32>,
    pub brand_ids: Vec<u32>,
}

/// One row of the `site_id <-> anchor_int_id` bijection written alongside
/// the anchor table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorIdMapRow {
    pub site_id: Uuid,
    pub anchor_int_id: AnchorIntId,
}
