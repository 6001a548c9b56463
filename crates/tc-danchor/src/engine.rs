//! Per-entity nearest-anchor search: for a single `(mode, entity)` slice,
//! find the nearest anchor site carrying that entity and report every
//! anchor's distance to it.

use tc_core::{AnchorSite, DAnchorRow, EntityKind, Seconds};
use tc_graph::{run_batch, RoadNetwork};

/// Computes D_anchor slices over a fixed anchor set and network. One
/// instance serves every entity for a given (mode, resolution-set) run,
/// same shape as `KBestEngine` but K is always 1 and the source set is
/// re-derived per entity rather than fixed up front.
pub struct DAnchorEngine<'a> {
    network: &'a RoadNetwork,
    anchors: &'a [AnchorSite],
}

impl<'a> DAnchorEngine<'a> {
    pub fn new(network: &'a RoadNetwork, anchors: &'a [AnchorSite]) -> Self {
        Self { network, anchors }
    }

    /// Compute one `(kind, entity_id)` slice: nearest-source seconds for
    /// every anchor in the set, sentinel-filled for anchors with no source
    /// within `cutoff`. Always returns exactly `anchors.len()` rows so
    /// downstream joins see a complete set regardless of reachability.
    pub fn compute_slice(&self, kind: EntityKind, entity_id: u32, cutoff: Seconds) -> Vec<DAnchorRow> {
        let sources: Vec<_> = self
            .anchors
            .iter()
            .filter(|a| entity_membership(a, kind, entity_id))
            .map(|a| (a.node_id, a.anchor_int_id.0))
            .collect();

        if sources.is_empty() {
            return self
                .anchors
                .iter()
                .map(|a| DAnchorRow { anchor_int_id: a.anchor_int_id, seconds: Seconds::UNREACHABLE })
                .collect();
        }

        let labels = run_batch(self.network, &sources, 1, cutoff, &|| false);

        self.anchors
            .iter()
            .map(|a| {
                let seconds = labels[a.node_id.index()]
                    .entries()
                    .first()
                    .map(|e| e.seconds)
                    .unwrap_or(Seconds::UNREACHABLE);
                DAnchorRow { anchor_int_id: a.anchor_int_id, seconds }
            })
            .collect()
    }
}

fn entity_membership(anchor: &AnchorSite, kind: EntityKind, entity_id: u32) -> bool {
    match kind {
        EntityKind::Category => anchor.category_ids.contains(&entity_id),
        EntityKind::Brand => anchor.brand_ids.contains(&entity_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::{AnchorIntId, GeoPoint, NodeId};
    use tc_graph::RoadNetworkBuilder;

    fn site(node_id: NodeId, anchor_int_id: u32, category_ids: Vec<u32>) -> AnchorSite {
        AnchorSite {
            anchor_int_id: AnchorIntId(anchor_int_id),
            site_id: uuid::Uuid::nil(),
            node_id,
            lon: 0.0,
            lat: 0.0,
            poi_ids: vec![1],
            category_ids,
            brand_ids: vec![],
        }
    }

    fn line_network() -> (RoadNetwork, [NodeId; 3]) {
        let mut b = RoadNetworkBuilder::new();
        let nodes = [
            b.add_node(0, GeoPoint::new(0.0, 0.0)),
            b.add_node(1, GeoPoint::new(0.0, 1.0)),
            b.add_node(2, GeoPoint::new(0.0, 2.0)),
        ];
        b.add_road(nodes[0], nodes[1], Seconds(30));
        b.add_road(nodes[1], nodes[2], Seconds(30));
        (b.build(), nodes)
    }

    #[test]
    fn nearest_source_reported_for_every_anchor() {
        let (net, nodes) = line_network();
        let anchors = vec![site(nodes[0], 0, vec![5]), site(nodes[2], 1, vec![])];
        let engine = DAnchorEngine::new(&net, &anchors);
        let rows = engine.compute_slice(EntityKind::Category, 5, Seconds(1000));

        assert_eq!(rows.len(), 2);
        let by_id: std::collections::HashMap<_, _> =
            rows.iter().map(|r| (r.anchor_int_id, r.seconds)).collect();
        assert_eq!(by_id[&AnchorIntId(0)], Seconds(0));
        assert_eq!(by_id[&AnchorIntId(1)], Seconds(60));
    }

    #[test]
    fn no_source_yields_sentinel_for_all_anchors() {
        let (net, nodes) = line_network();
        let anchors = vec![site(nodes[0], 0, vec![]), site(nodes[2], 1, vec![])];
        let engine = DAnchorEngine::new(&net, &anchors);
        let rows = engine.compute_slice(EntityKind::Category, 999, Seconds(1000));
        assert!(rows.iter().all(|r| r.seconds.is_unreachable()));
    }

    #[test]
    fn unreached_anchor_within_cutoff_gets_sentinel() {
        let (net, nodes) = line_network();
        let anchors = vec![site(nodes[0], 0, vec![5]), site(nodes[2], 1, vec![])];
        let engine = DAnchorEngine::new(&net, &anchors);
        let rows = engine.compute_slice(EntityKind::Category, 5, Seconds(45));
        let by_id: std::collections::HashMap<_, _> =
            rows.iter().map(|r| (r.anchor_int_id, r.seconds)).collect();
        assert_eq!(by_id[&AnchorIntId(0)], Seconds(0));
        assert!(by_id[&AnchorIntId(1)].is_unreachable());
    }

    /// The 4-node directed cycle `0->1->2->3->0`, weights 60/120/60/120,
    /// anchors at nodes {0, 2} with ids {10, 20} — the same fixture used for
    /// the kernel-level top-K scenarios.
    fn cycle_anchors() -> (RoadNetwork, [NodeId; 4], Vec<AnchorSite>) {
        let mut b = RoadNetworkBuilder::new();
        let nodes = [
            b.add_node(0, GeoPoint::new(0.0, 0.0)),
            b.add_node(1, GeoPoint::new(0.0, 1.0)),
            b.add_node(2, GeoPoint::new(0.0, 2.0)),
            b.add_node(3, GeoPoint::new(0.0, 3.0)),
        ];
        b.add_directed_edge(nodes[0], nodes[1], Seconds(60));
        b.add_directed_edge(nodes[1], nodes[2], Seconds(120));
        b.add_directed_edge(nodes[2], nodes[3], Seconds(60));
        b.add_directed_edge(nodes[3], nodes[0], Seconds(120));
        let anchors = vec![site(nodes[0], 10, vec![7]), site(nodes[2], 20, vec![])];
        (b.build(), nodes, anchors)
    }

    /// S5 — D_anchor completeness: a category with a POI only at node 0
    /// must produce a row for every anchor, including the unreached one at
    /// its real seconds (not omitted).
    #[test]
    fn s5_d_anchor_completeness() {
        let (net, _nodes, anchors) = cycle_anchors();
        let engine = DAnchorEngine::new(&net, &anchors);
        let rows = engine.compute_slice(EntityKind::Category, 7, Seconds(10_000));

        assert_eq!(rows.len(), 2);
        let by_id: std::collections::HashMap<_, _> =
            rows.iter().map(|r| (r.anchor_int_id, r.seconds)).collect();
        assert_eq!(by_id[&AnchorIntId(10)], Seconds(0));
        assert_eq!(by_id[&AnchorIntId(20)], Seconds(180));
    }

    /// S6 — sentinel discipline: a category whose sources are all isolated
    /// from the cycle reaching node 2 must still emit a row for anchor 20,
    /// carrying the sentinel rather than being omitted.
    #[test]
    fn s6_sentinel_discipline() {
        let (net, _nodes, anchors) = cycle_anchors();
        let engine = DAnchorEngine::new(&net, &anchors);
        // Cutoff below the 180s it would take to reach anchor 20 from the
        // only source (node 0) isolates it entirely.
        let rows = engine.compute_slice(EntityKind::Category, 7, Seconds(100));

        assert_eq!(rows.len(), 2);
        let by_id: std::collections::HashMap<_, _> =
            rows.iter().map(|r| (r.anchor_int_id, r.seconds)).collect();
        assert_eq!(by_id[&AnchorIntId(10)], Seconds(0));
        assert_eq!(by_id[&AnchorIntId(20)], Seconds::UNREACHABLE);
    }
}
