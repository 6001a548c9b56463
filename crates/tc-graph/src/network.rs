//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges,
//! matching the triad `(xadj, head, weight)`: `node_out_start` is `xadj`,
//! `edge_to` is `head`, `edge_seconds` is `weight`. Given a `NodeId n`, its
//! outgoing edges occupy the slice:
//!
//! ```text
//! edges[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays are sorted by source node and indexed by `EdgeId`.
//! Iteration over a node's outgoing edges is a contiguous memory scan,
//! which is what the bucketed SSSP kernel's inner loop relies on.
//!
//! Edge weights are [`Seconds`], not raw integers — the uint16 cost domain,
//! its sentinel, and its saturating-add monoid live on the type, not as a
//! convention callers have to remember.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to nearby `NodeId`s. Used by the
//! anchor snapper to find connectivity-aware candidates for each POI.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use tc_core::{EdgeId, GeoPoint, NodeId, Seconds};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space. Sufficient for nearest
    /// and k-nearest queries within a metro area; callers needing
    /// metre-accurate ranking should re-rank candidates with
    /// `GeoPoint::planar_xy_m`.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node snapping.
///
/// All fields are `pub` for direct indexed access on hot paths. Do not
/// construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    /// Geographic position of each node. Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// The stable external (source-extract) id of each node, e.g. an OSM
    /// node id. Indexed by `NodeId`.
    pub external_id: Vec<i64>,

    /// CSR row pointer (`xadj`). Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`. Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each edge. Redundant with CSR but needed for route
    /// reconstruction.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge (`head`).
    pub edge_to: Vec<NodeId>,

    /// Travel time of each edge in whole seconds (`weight`).
    pub edge_seconds: Vec<Seconds>,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`. A
    /// contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node`, used by anchor snapping's connectivity filter.
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Return the `NodeId` of the nearest road node to `pos`. `None` only if
    /// the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// Return up to `k` nearest nodes to `pos`, sorted by ascending
    /// lat/lon-space distance.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed edges in any order. `build()`
/// drops self-loops, collapses parallel edges to their minimum weight,
/// sorts by source then destination to produce the CSR arrays, and
/// bulk-loads the R-tree.
///
/// # Example
///
/// ```
/// use tc_core::{GeoPoint, Seconds};
/// use tc_graph::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(1, GeoPoint::new(30.69, -88.04));
/// let c = b.add_node(2, GeoPoint::new(30.70, -88.03));
/// b.add_road(a, c, Seconds(90));
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes: Vec<GeoPoint>,
    external_ids: Vec<i64>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from: NodeId,
    to: NodeId,
    seconds: Seconds,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), external_ids: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            external_ids: Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0, in
    /// first-appearance order — callers that need deterministic ids must
    /// call this in a deterministic order; see `osm::load_from_pbf`).
    pub fn add_node(&mut self, external_id: i64, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.external_ids.push(external_id);
        id
    }

    /// Add a **directed** edge from `from` to `to` with the given travel
    /// time. Self-loops and parallel-edge collapsing are handled at
    /// `build()` time, not here, so callers can add edges in any order.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, seconds: Seconds) {
        self.raw_edges.push(RawEdge { from, to, seconds });
    }

    /// Convenience: add edges in **both directions** for an undirected road
    /// segment (the common case for two-way roads).
    pub fn add_road(&mut self, a: NodeId, b: NodeId, seconds: Seconds) {
        self.add_directed_edge(a, b, seconds);
        self.add_directed_edge(b, a, seconds);
    }

    /// Look up the position of a node added earlier (used by the OSM loader
    /// to compute edge lengths between adjacent way nodes).
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.raw_edges.len()
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Drops self-loops, then sorts edges by `(from, to, seconds)` so that,
    /// for any parallel-edge group, the lowest-weight entry sorts first and
    /// the rest can be discarded in one linear pass — the invariant is
    /// "collapsed by taking the minimum weight", not which specific
    /// duplicate survives.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();

        let mut raw: Vec<RawEdge> = self
            .raw_edges
            .into_iter()
            .filter(|e| e.from != e.to)
            .collect();
        raw.sort_by_key(|e| (e.from.0, e.to.0, e.seconds.0));

        let mut edge_from: Vec<NodeId> = Vec::with_capacity(raw.len());
        let mut edge_to: Vec<NodeId> = Vec::with_capacity(raw.len());
        let mut edge_seconds: Vec<Seconds> = Vec::with_capacity(raw.len());
        for e in raw {
            if let (Some(&lf), Some(&lt)) = (edge_from.last(), edge_to.last()) {
                if lf == e.from && lt == e.to {
                    continue; // duplicate of the (from, to) pair just kept, which had <= weight
                }
            }
            edge_from.push(e.from);
            edge_to.push(e.to);
            edge_seconds.push(e.seconds);
        }
        let edge_count = edge_from.len();

        let mut node_out_start = vec![0u32; node_count + 1];
        for &f in &edge_from {
            node_out_start[f.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry { point: [pos.lat, pos.lon], id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            external_id: self.external_ids,
            node_out_start,
            edge_from,
            edge_to,
            edge_seconds,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
