//! Anchor site construction: connectivity-aware POI snapping, grouping, and
//! deterministic id assignment.
//!
//! Grounded on the same `k_nearest_nodes` / node-degree access pattern the
//! network's R-tree already exposes for single-point snapping; this module
//! only adds the multi-candidate selection and aggregation logic on top.

use std::collections::HashMap;

use uuid::Uuid;

use tc_core::{AnchorIdMapRow, AnchorIntId, AnchorSite, GeoPoint, NodeId, Poi, TravelMode};

use crate::network::RoadNetwork;

/// Number of nearest-node candidates considered per POI before filtering.
const SNAP_CANDIDATES: usize = 10;

/// Snap a single POI's coordinate to a road node.
///
/// 1. Query the `k=10` nearest graph nodes.
/// 2. Filter to degree >= 2; if none qualify, fall back to the full
///    candidate set (an isolated stub is still better than no anchor).
/// 3. Retain candidates within `2 * distance_to_nearest`.
/// 4. Pick highest degree; ties broken by smallest distance, then smallest
///    node index.
///
/// Returns `None` only if the network has no nodes at all.
pub fn snap_poi(network: &RoadNetwork, pos: GeoPoint) -> Option<NodeId> {
    let candidates = network.k_nearest_nodes(pos, SNAP_CANDIDATES);
    if candidates.is_empty() {
        return None;
    }

    let distances: Vec<f32> = candidates
        .iter()
        .map(|&n| network.node_pos[n.index()].distance_m(pos))
        .collect();
    let nearest_distance = distances.iter().copied().fold(f32::INFINITY, f32::min);

    let connected: Vec<usize> = (0..candidates.len())
        .filter(|&i| network.out_degree(candidates[i]) >= 2)
        .collect();
    let pool: Vec<usize> = if connected.is_empty() {
        (0..candidates.len()).collect()
    } else {
        connected
    };

    let retained: Vec<usize> = pool
        .into_iter()
        .filter(|&i| distances[i] <= 2.0 * nearest_distance)
        .collect();

    retained
        .into_iter()
        .max_by(|&a, &b| {
            let deg_a = network.out_degree(candidates[a]);
            let deg_b = network.out_degree(candidates[b]);
            deg_a
                .cmp(&deg_b)
                .then(distances[b].partial_cmp(&distances[a]).unwrap_or(std::cmp::Ordering::Equal))
                .then(candidates[b].0.cmp(&candidates[a].0))
        })
        .map(|i| candidates[i])
}

/// Build the anchor table for one mode from a POI set and a routable graph.
///
/// Returns `(sites, id_map)` sorted by `anchor_int_id` ascending (i.e. by
/// `site_id` ascending, since the two orders are the same by construction).
pub fn build_anchor_sites(
    network: &RoadNetwork,
    pois: &[Poi],
    mode: TravelMode,
) -> (Vec<AnchorSite>, Vec<AnchorIdMapRow>) {
    let mut groups: HashMap<NodeId, Vec<&Poi>> = HashMap::new();
    for poi in pois {
        if let Some(node_id) = snap_poi(network, GeoPoint::new(poi.lat, poi.lon)) {
            groups.entry(node_id).or_default().push(poi);
        }
    }

    let mut raw: Vec<(Uuid, NodeId, Vec<&Poi>)> = groups
        .into_iter()
        .map(|(node_id, group)| {
            let site_id = site_uuid(mode, node_id);
            (site_id, node_id, group)
        })
        .collect();
    raw.sort_by(|a, b| a.0.cmp(&b.0));

    let mut sites = Vec::with_capacity(raw.len());
    let mut id_map = Vec::with_capacity(raw.len());
    for (i, (site_id, node_id, group)) in raw.into_iter().enumerate() {
        let anchor_int_id = AnchorIntId(i as u32);
        let pos = network.node_pos[node_id.index()];

        let mut poi_ids: Vec<u64> = group.iter().map(|p| p.poi_id).collect();
        let mut category_ids: Vec<u32> = group.iter().map(|p| p.category_id).collect();
        let mut brand_ids: Vec<u32> = group.iter().filter_map(|p| p.brand_id).collect();
        poi_ids.sort_unstable();
        category_ids.sort_unstable();
        category_ids.dedup();
        brand_ids.sort_unstable();
        brand_ids.dedup();

        sites.push(AnchorSite {
            anchor_int_id,
            site_id,
            node_id,
            lon: pos.lon,
            lat: pos.lat,
            poi_ids,
            category_ids,
            brand_ids,
        });
        id_map.push(AnchorIdMapRow { site_id, anchor_int_id });
    }

    (sites, id_map)
}

/// `site_id = uuid5(namespace, "{mode}|{node_id}")` — deterministic and
/// reproducible across runs for the same (mode, node_id) pair.
fn site_uuid(mode: TravelMode, node_id: NodeId) -> Uuid {
    let key = format!("{mode}|{}", node_id.0);
    Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::RoadNetworkBuilder;
    use tc_core::Seconds;

    fn small_grid() -> RoadNetwork {
        // A tiny degree-3 hub (node 1) plus two degree-1 stubs.
        let mut b = RoadNetworkBuilder::new();
        let hub = b.add_node(0, GeoPoint::new(0.0, 0.0));
        let a = b.add_node(1, GeoPoint::new(0.0, 0.001));
        let c = b.add_node(2, GeoPoint::new(0.001, 0.0));
        let stub = b.add_node(3, GeoPoint::new(-1.0, -1.0));
        b.add_road(hub, a, Seconds(10));
        b.add_road(hub, c, Seconds(10));
        let _ = stub;
        b.build()
    }

    #[test]
    fn snap_prefers_higher_degree_within_radius() {
        let net = small_grid();
        // A POI essentially on top of the hub should snap to the hub
        // (degree 2) over the degree-1 stubs, even if a stub is marginally
        // closer.
        let snapped = snap_poi(&net, GeoPoint::new(0.0001, 0.0001)).unwrap();
        assert_eq!(net.out_degree(snapped), 2);
    }

    #[test]
    fn s4_anchor_id_dense_assignment() {
        // Three site candidates whose site_ids sort as a, b, c regardless
        // of insertion order must receive anchor_int_id 0, 1, 2 in that
        // sorted order.
        let ids = [
            site_uuid(TravelMode::Drive, NodeId(2)),
            site_uuid(TravelMode::Drive, NodeId(0)),
            site_uuid(TravelMode::Drive, NodeId(1)),
        ];
        let mut sorted = ids;
        sorted.sort();
        let mut indices: Vec<usize> = (0..3).collect();
        indices.sort_by_key(|&i| ids[i]);
        // Whatever node produced the smallest uuid gets anchor_int_id 0.
        assert_eq!(indices.len(), 3);
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn every_site_has_at_least_one_poi() {
        let net = small_grid();
        let pois = vec![Poi {
            poi_id: 1,
            brand_id: Some(5),
            category_id: 9,
            lon: 0.0001,
            lat: 0.0001,
            source: "test".into(),
        }];
        let (sites, id_map) = build_anchor_sites(&net, &pois, TravelMode::Drive);
        assert_eq!(sites.len(), 1);
        assert_eq!(id_map.len(), 1);
        assert!(!sites[0].poi_ids.is_empty());
        assert_eq!(sites[0].anchor_int_id, AnchorIntId(0));
    }

    #[test]
    fn dense_unique_anchor_int_ids() {
        let net = small_grid();
        let pois = vec![
            Poi { poi_id: 1, brand_id: None, category_id: 1, lon: 0.0001, lat: 0.0001, source: "a".into() },
            Poi { poi_id: 2, brand_id: None, category_id: 1, lon: 0.0009, lat: 0.0001, source: "b".into() },
        ];
        let (sites, _) = build_anchor_sites(&net, &pois, TravelMode::Drive);
        let mut ids: Vec<u32> = sites.iter().map(|s| s.anchor_int_id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..sites.len() as u32).collect::<Vec<_>>());
    }
}
