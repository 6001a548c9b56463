//! Batched multi-source top-K engine: runs anchors through
//! [`tc_graph::run_batch`] in `batch_size`-sized groups and merges each
//! batch's per-node labels into one global per-node `TopK`.

use tc_core::{AnchorSite, Seconds};
use tc_graph::{run_batch, RoadNetwork, TopK};

use crate::{KBestError, KBestResult};

/// Engine-wide parameters, one set per (mode, resolution-set) run.
#[derive(Copy, Clone, Debug)]
pub struct KBestParams {
    pub k: usize,
    pub cutoff_seconds: Seconds,
    pub overflow_cutoff_seconds: Seconds,
    pub batch_size: usize,
}

impl KBestParams {
    fn validate(&self) -> KBestResult<()> {
        if self.k == 0 {
            return Err(KBestError::Config("k must be >= 1".into()));
        }
        if self.batch_size == 0 {
            return Err(KBestError::Config("batch_size must be >= 1".into()));
        }
        if self.overflow_cutoff_seconds.0 < self.cutoff_seconds.0 {
            return Err(KBestError::Config(
                "overflow_cutoff_seconds must be >= cutoff_seconds".into(),
            ));
        }
        Ok(())
    }
}

/// Computes, for every node in `network`, the K best `(anchor_int_id,
/// seconds)` pairs among `anchors`.
pub struct KBestEngine<'a> {
    network: &'a RoadNetwork,
    anchors: &'a [AnchorSite],
    params: KBestParams,
}

impl<'a> KBestEngine<'a> {
    pub fn new(
        network: &'a RoadNetwork,
        anchors: &'a [AnchorSite],
        params: KBestParams,
    ) -> KBestResult<Self> {
        params.validate()?;
        for anchor in anchors {
            if anchor.node_id.index() >= network.node_count() {
                return Err(KBestError::AnchorNodeOutOfRange(anchor.node_id.0));
            }
        }
        Ok(Self { network, anchors, params })
    }

    /// Run every batch and return one [`TopK`] per node, indexed by
    /// `NodeId`.
    pub fn run<O: crate::KBestObserver>(&self, observer: &mut O) -> Vec<TopK> {
        let node_count = self.network.node_count();
        let sources: Vec<(tc_core::NodeId, u32)> = self
            .anchors
            .iter()
            .map(|a| (a.node_id, a.anchor_int_id.0))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let global = {
            let mut global: Vec<TopK> = (0..node_count).map(|_| TopK::new(self.params.k)).collect();
            for (batch_index, batch) in sources.chunks(self.params.batch_size).enumerate() {
                observer.on_batch_start(batch_index, batch.len());
                let labels = run_batch(
                    self.network,
                    batch,
                    self.params.k,
                    self.params.overflow_cutoff_seconds,
                    &|| false,
                );
                merge_into(&mut global, &labels);
                observer.on_batch_end(batch_index);
            }
            global
        };

        #[cfg(feature = "parallel")]
        let global = {
            use rayon::prelude::*;

            sources
                .par_chunks(self.params.batch_size)
                .map(|batch| {
                    run_batch(
                        self.network,
                        batch,
                        self.params.k,
                        self.params.overflow_cutoff_seconds,
                        &|| false,
                    )
                })
                .reduce(
                    || (0..node_count).map(|_| TopK::new(self.params.k)).collect::<Vec<_>>(),
                    |mut a, b| {
                        merge_into(&mut a, &b);
                        a
                    },
                )
        };

        observer.on_run_end(node_count);
        global
    }
}

/// Merge `b`'s per-node labels into `a` in place. Commutative and
/// associative (see [`TopK::merge_from`]), which is what makes the
/// `parallel` feature's tree-shaped `reduce` produce the same result as the
/// sequential fold.
fn merge_into(a: &mut [TopK], b: &[TopK]) {
    for (node_a, node_b) in a.iter_mut().zip(b.iter()) {
        node_a.merge_from(node_b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::{AnchorIntId, GeoPoint};
    use tc_graph::RoadNetworkBuilder;

    fn tiny_network() -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(0, GeoPoint::new(0.0, 0.0));
        let c = b.add_node(1, GeoPoint::new(0.0, 1.0));
        let d = b.add_node(2, GeoPoint::new(0.0, 2.0));
        b.add_road(a, c, Seconds(30));
        b.add_road(c, d, Seconds(30));
        b.build()
    }

    fn anchor_at(node_id: tc_core::NodeId, anchor_int_id: u32) -> AnchorSite {
        AnchorSite {
            anchor_int_id: AnchorIntId(anchor_int_id),
            site_id: uuid::Uuid::nil(),
            node_id,
            lon: 0.0,
            lat: 0.0,
            poi_ids: vec![1],
            category_ids: vec![1],
            brand_ids: vec![],
        }
    }

    #[test]
    fn batching_matches_single_batch_result() {
        let net = tiny_network();
        let nodes: Vec<_> = (0..net.node_count()).map(|i| tc_core::NodeId(i as u32)).collect();
        let anchors = vec![anchor_at(nodes[0], 10), anchor_at(nodes[2], 20)];
        let params = KBestParams {
            k: 2,
            cutoff_seconds: Seconds(1000),
            overflow_cutoff_seconds: Seconds(1000),
            batch_size: 1,
        };
        let engine = KBestEngine::new(&net, &anchors, params).unwrap();
        let mut obs = crate::NoopObserver;
        let labels = engine.run(&mut obs);

        let params_single = KBestParams { batch_size: 2, ..params };
        let engine_single = KBestEngine::new(&net, &anchors, params_single).unwrap();
        let labels_single = engine_single.run(&mut crate::NoopObserver);

        for (a, b) in labels.iter().zip(labels_single.iter()) {
            assert_eq!(a.entries(), b.entries());
        }
    }

    #[test]
    fn out_of_range_anchor_node_is_rejected() {
        let net = tiny_network();
        let bogus = anchor_at(tc_core::NodeId(99), 1);
        let params = KBestParams {
            k: 1,
            cutoff_seconds: Seconds(100),
            overflow_cutoff_seconds: Seconds(100),
            batch_size: 1,
        };
        let err = KBestEngine::new(&net, &[bogus], params).unwrap_err();
        assert!(matches!(err, KBestError::AnchorNodeOutOfRange(99)));
    }

    #[test]
    fn zero_k_is_rejected() {
        let net = tiny_network();
        let params = KBestParams {
            k: 0,
            cutoff_seconds: Seconds(100),
            overflow_cutoff_seconds: Seconds(100),
            batch_size: 1,
        };
        assert!(KBestEngine::new(&net, &[], params).is_err());
    }
}
