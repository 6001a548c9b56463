//! Bucketed multi-source shortest-path kernel (Dial's algorithm) plus its
//! per-node top-K heap.
//!
//! This is the one routing primitive shared by the K-best engine (K =
//! configured top-K) and the D_anchor engine (K = 1, nearest source). Both
//! call [`run_batch`] with a batch of `(source_node, source_id)` pairs drawn
//! from their respective anchor/source sets; the kernel doesn't know or care
//! which engine is calling it.
//!
//! # Why one bucket queue serves many sources
//!
//! A classic single-source Dial's algorithm settles each node once. Here we
//! want, for every node, the K *distinct-source* shortest times — so a node
//! can be settled once per source that still has a chance of landing in its
//! top-K, not once overall. Bucket entries therefore carry `(seconds, node,
//! source_id)`, and the admission check before pushing a relaxed edge is
//! exactly the top-K insertion check: if a candidate can't possibly improve
//! a node's heap, it's never queued in the first place. This keeps the
//! queue bounded in practice even though it is conceptually running up to
//! `batch_size` Dijkstras at once.
//!
//! # Overflow tier, for free
//!
//! [`TopK`] is a single ascending-order heap of capacity `k`, admitting any
//! candidate with `seconds <= overflow_cutoff`. Because primary-tier
//! candidates (`seconds <= primary_cutoff`) are always numerically smaller
//! than overflow-tier ones, a full heap's worst (last) entry is always an
//! overflow entry if any are present — so a later-arriving primary
//! candidate naturally evicts it. No separate bookkeeping for "is this an
//! overflow entry" is needed; the spec's "overflow kept only if no primary
//! result exists for that slot" falls out of plain ascending-order top-K
//! admission over the combined `[0, overflow_cutoff]` range.

use tc_core::{NodeId, Seconds};

use crate::network::RoadNetwork;

// ── TopK ──────────────────────────────────────────────────────────────────────

/// One accepted `(source_id, seconds)` pair. `source_id` is a caller-chosen
/// dense integer — the K-best engine uses the anchor's `anchor_int_id`
/// directly, so ties break on it without any extra lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TopKEntry {
    pub source_id: u32,
    pub seconds: Seconds,
}

/// Bounded max-size-`k` collection of the best `(source_id, seconds)` pairs
/// seen for one node, kept sorted ascending by `(seconds, source_id)` —
/// smaller seconds first, ties broken by smaller id.
#[derive(Clone, Debug)]
pub struct TopK {
    entries: Vec<TopKEntry>,
    k: usize,
}

#[inline]
fn cmp_key(e: &TopKEntry) -> (u16, u32) {
    (e.seconds.0, e.source_id)
}

impl TopK {
    pub fn new(k: usize) -> Self {
        Self { entries: Vec::with_capacity(k), k }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TopKEntry] {
        &self.entries
    }

    pub fn contains_source(&self, source_id: u32) -> bool {
        self.entries.iter().any(|e| e.source_id == source_id)
    }

    /// The worst (largest) accepted seconds, if the heap is at capacity.
    /// `None` means the heap isn't full yet, so any non-duplicate candidate
    /// still has a chance.
    pub fn worst(&self) -> Option<Seconds> {
        if self.entries.len() < self.k {
            None
        } else {
            self.entries.last().map(|e| e.seconds)
        }
    }

    /// `true` if a candidate with this `(source_id, seconds)` would change
    /// the heap — used by the kernel to decide whether an edge relaxation
    /// is worth queuing at all.
    pub fn would_improve(&self, source_id: u32, seconds: Seconds) -> bool {
        if self.contains_source(source_id) {
            return false;
        }
        match self.worst() {
            None => true,
            Some(worst) => seconds < worst,
        }
    }

    /// Insert the candidate if it improves the heap. Returns `true` if
    /// inserted.
    pub fn try_insert(&mut self, source_id: u32, seconds: Seconds) -> bool {
        if self.contains_source(source_id) {
            return false;
        }
        let candidate = TopKEntry { source_id, seconds };
        if self.entries.len() < self.k {
            let pos = self.entries.partition_point(|e| cmp_key(e) <= cmp_key(&candidate));
            self.entries.insert(pos, candidate);
            return true;
        }
        if let Some(&worst) = self.entries.last() {
            if cmp_key(&candidate) < cmp_key(&worst) {
                self.entries.pop();
                let pos = self.entries.partition_point(|e| cmp_key(e) <= cmp_key(&candidate));
                self.entries.insert(pos, candidate);
                return true;
            }
        }
        false
    }

    /// Merge another node's top-K (from a different batch) into this one —
    /// the K-way batch merge from the K-best engine. Commutative: the
    /// result doesn't depend on merge order, only on the union of inputs.
    pub fn merge_from(&mut self, other: &TopK) {
        for e in other.entries() {
            self.try_insert(e.source_id, e.seconds);
        }
    }
}

// ── Bucketed multi-source SSSP ────────────────────────────────────────────────

/// Run multi-source bucketed Dijkstra (Dial's algorithm, 1-second-wide FIFO
/// buckets) from `sources` over `network`, returning one [`TopK`] per node
/// holding up to `k` best `(source_id, seconds)` pairs.
///
/// `primary_cutoff` and `overflow_cutoff` bound admission: any relaxed
/// distance above `overflow_cutoff` is discarded outright (see module docs
/// for how the overflow tier falls out of plain top-K admission over
/// `[0, overflow_cutoff]`). `cancel` is polled at every bucket advance.
///
/// Sources at the same node with different ids are independent entries;
/// a node in `sources` gets `seconds = 0` to its own id, same as any other
/// node reached at distance zero.
pub fn run_batch(
    network: &RoadNetwork,
    sources: &[(NodeId, u32)],
    k: usize,
    overflow_cutoff: Seconds,
    cancel: &dyn Fn() -> bool,
) -> Vec<TopK> {
    let n = network.node_count();
    let mut labels: Vec<TopK> = (0..n).map(|_| TopK::new(k)).collect();

    let max_bucket = overflow_cutoff.0 as usize;
    let mut buckets: Vec<Vec<(NodeId, u32)>> = (0..=max_bucket + 1).map(|_| Vec::new()).collect();

    for &(node, src) in sources {
        if labels[node.index()].try_insert(src, Seconds::ZERO) {
            buckets[0].push((node, src));
        }
    }

    let mut cur = 0usize;
    while cur <= max_bucket {
        if cancel() {
            break;
        }

        let mut idx = 0;
        while idx < buckets[cur].len() {
            let (node, src) = buckets[cur][idx];
            idx += 1;
            let d_u = Seconds(cur as u16);

            for edge in network.out_edges(node) {
                let v = network.edge_to[edge.index()];
                let w = network.edge_seconds[edge.index()];
                let d_v = d_u.saturating_add(w);
                if d_v.is_unreachable() || d_v.0 as usize > max_bucket {
                    continue;
                }
                if labels[v.index()].would_improve(src, d_v)
                    && labels[v.index()].try_insert(src, d_v)
                {
                    buckets[d_v.0 as usize].push((v, src));
                }
            }
        }
        buckets[cur].clear();
        cur += 1;
    }

    labels
}
