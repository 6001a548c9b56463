//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use tc_core::TravelMode;
//! use tc_graph::osm::load_from_pbf;
//!
//! let network = load_from_pbf(Path::new("mobile_al.osm.pbf"), TravelMode::Drive)?;
//! ```
//!
//! # What is loaded
//!
//! Only `highway=*` ways whose classification resolves to a speed for the
//! requested mode are included (see [`speed_mps_for_mode`]). All other
//! features (buildings, POIs, relations) are ignored. One-way roads add a
//! single directed edge; two-way roads add both directions.
//!
//! # Node ordering
//!
//! Internal `NodeId`s are assigned in first-appearance order while scanning
//! `road_ways` in the order the extract streamed them — not in the order a
//! `HashSet`/`HashMap` happens to iterate. This makes graph construction
//! deterministic across runs for byte-identical inputs, which downstream
//! determinism (anchor ids, output row ordering) depends on.
//!
//! # Memory note
//!
//! The loader buffers all OSM nodes in a `HashMap<i64, GeoPoint>` for the
//! first pass (ways reference node ids by OSM integer id, so random access
//! is unavoidable until the road-relevant subset is known). The map is
//! freed before the second pass.

use std::collections::HashMap;
use std::path::Path;

use osmpbf::{Element, ElementReader};

use tc_core::{GeoPoint, NodeId, Seconds, TravelMode};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::GraphError;

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a road network from an OSM PBF file for the given travel mode.
///
/// # Errors
///
/// Returns [`GraphError::Osm`] on parse errors, [`GraphError::Io`] on file
/// errors.
pub fn load_from_pbf(path: &Path, mode: TravelMode) -> Result<RoadNetwork, GraphError> {
    // ── Phase 1: collect all OSM nodes + mode-admissible ways ──────────────
    let reader = ElementReader::from_path(path)?;

    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();
    let mut dropped_tag_count: u64 = 0;

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat() as f32, n.lon() as f32));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat() as f32, n.lon() as f32));
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let highway = tags.iter().find(|(k, _)| *k == "highway").map(|(_, v)| *v);

                match highway.and_then(|h| speed_mps_for_mode(mode, h)) {
                    Some(speed_mps) => {
                        let oneway = is_oneway(highway.unwrap_or(""), &tags);
                        let refs: Vec<i64> = w.refs().collect();
                        road_ways.push(OsmWay { refs, speed_mps, oneway });
                    }
                    None => {
                        if highway.is_some() {
                            dropped_tag_count += 1;
                        }
                    }
                }
            }
            _ => {}
        })
        .map_err(|e| GraphError::Osm(e.to_string()))?;

    if dropped_tag_count > 0 {
        tracing::warn!(count = dropped_tag_count, mode = %mode, "dropped ways outside the mode's classification table");
    }

    // ── Phase 2: assign NodeIds in first-appearance order over road_ways ───
    let mut osm_to_node: HashMap<i64, NodeId> = HashMap::new();
    let mut builder = RoadNetworkBuilder::with_capacity(all_nodes.len(), road_ways.len() * 2);

    for way in &road_ways {
        for &osm_id in &way.refs {
            if osm_to_node.contains_key(&osm_id) {
                continue;
            }
            if let Some(&pos) = all_nodes.get(&osm_id) {
                let node_id = builder.add_node(osm_id, pos);
                osm_to_node.insert(osm_id, node_id);
            }
        }
    }
    drop(all_nodes);

    // ── Phase 3: add directed edges from way node sequences ────────────────
    for way in &road_ways {
        for window in way.refs.windows(2) {
            let (osm_a, osm_b) = (window[0], window[1]);
            if let (Some(&from), Some(&to)) = (osm_to_node.get(&osm_a), osm_to_node.get(&osm_b)) {
                let len_m = builder.node_pos(from).distance_m(builder.node_pos(to));
                let seconds = Seconds::from_distance(len_m, way.speed_mps);

                builder.add_directed_edge(from, to, seconds);
                if !way.oneway {
                    builder.add_directed_edge(to, from, seconds);
                }
            }
        }
    }

    Ok(builder.build())
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmWay {
    refs: Vec<i64>,
    speed_mps: f32,
    oneway: bool,
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

const WALK_SPEED_MPS: f32 = 1.4;

/// Free-flow car speed (m/s) for a `highway` classification, or `None` if
/// the value is not admissible in this classification table at all — the
/// table both modes are derived from.
fn base_speed_mps(highway: &str) -> Option<f32> {
    match highway {
        "motorway" | "motorway_link" => Some(29.1), // ~65 mph
        "trunk" | "trunk_link" => Some(24.6),       // ~55 mph
        "primary" | "primary_link" => Some(20.1),   // ~45 mph
        "secondary" | "secondary_link" => Some(17.9), // ~40 mph
        "tertiary" | "tertiary_link" => Some(13.4), // ~30 mph
        "residential" | "living_street" => Some(8.9), // ~20 mph
        "service" | "unclassified" => Some(6.7),    // ~15 mph
        "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track" => None,
        _ => Some(8.9), // unknown road type — cautious default rather than dropping
    }
}

fn is_motorway_class(highway: &str) -> bool {
    matches!(highway, "motorway" | "motorway_link")
}

/// Speed (m/s) to use for `highway` under `mode`, or `None` if the way is
/// not admissible for this mode at all.
///
/// `drive` uses the classification table's free-flow speed directly.
/// `walk` uses a fixed pedestrian speed and excludes motorway-class ways,
/// per the mode semantics: same admissibility table, different speed model.
fn speed_mps_for_mode(mode: TravelMode, highway: &str) -> Option<f32> {
    base_speed_mps(highway)?;
    match mode {
        TravelMode::Drive => base_speed_mps(highway),
        TravelMode::Walk => {
            if is_motorway_class(highway) {
                None
            } else {
                Some(WALK_SPEED_MPS)
            }
        }
    }
}

/// Determine whether a way should be treated as one-way.
///
/// Motorways and motorway links are implicitly one-way in OSM convention.
fn is_oneway(highway: &str, tags: &[(&str, &str)]) -> bool {
    let explicit = tags
        .iter()
        .any(|(k, v)| *k == "oneway" && matches!(*v, "yes" | "1" | "true"));
    let implicit = is_motorway_class(highway);
    explicit || implicit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_excludes_motorway() {
        assert_eq!(speed_mps_for_mode(TravelMode::Walk, "motorway"), None);
        assert_eq!(speed_mps_for_mode(TravelMode::Drive, "motorway"), Some(29.1));
    }

    #[test]
    fn walk_uses_fixed_pedestrian_speed() {
        assert_eq!(speed_mps_for_mode(TravelMode::Walk, "residential"), Some(WALK_SPEED_MPS));
        assert_eq!(speed_mps_for_mode(TravelMode::Walk, "tertiary"), Some(WALK_SPEED_MPS));
    }

    #[test]
    fn non_admissible_tag_excluded_both_modes() {
        assert_eq!(speed_mps_for_mode(TravelMode::Drive, "footway"), None);
        assert_eq!(speed_mps_for_mode(TravelMode::Walk, "footway"), None);
    }
}
